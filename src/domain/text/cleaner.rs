use std::fs;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Read a source file and extract speakable plain text from it.
///
/// Supported formats: `.txt` (whitespace normalization only), `.md`
/// (markdown structure stripped), `.html`/`.htm` (converted to plain
/// text) and `.pdf` (page text with line flow repaired). Anything else
/// is rejected.
pub fn extract_text(path: &Path) -> AppResult<String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => extract_pdf(path),
        "md" => Ok(strip_markdown(&fs::read_to_string(path)?)),
        "html" | "htm" => Ok(strip_html(&fs::read_to_string(path)?)),
        "txt" => Ok(normalize_whitespace(&fs::read_to_string(path)?)),
        _ => Err(AppError::BadRequest(format!(
            "unsupported file format: .{extension} (expected .txt, .md, .html or .pdf)"
        ))),
    }
}

fn extract_pdf(path: &Path) -> AppResult<String> {
    let raw = pdf_extract::extract_text(path)
        .map_err(|e| AppError::BadRequest(format!("failed to extract PDF text: {e}")))?;
    Ok(repair_line_flow(&raw))
}

/// PDF page text arrives with hard line breaks mid-sentence. Keep a break
/// only after a line ending in `.`, `!`, `?`, `:` or `;`; join every other
/// line to the next with a space. Zero-width spaces are dropped.
fn repair_line_flow(text: &str) -> String {
    let without_zwsp = text.replace('\u{200b}', "");

    let mut repaired = String::new();
    for line in without_zwsp.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        repaired.push_str(line);
        if line.ends_with(['.', '!', '?', ':', ';']) {
            repaired.push('\n');
        } else {
            repaired.push(' ');
        }
    }

    normalize_whitespace(&repaired)
}

/// Replace runs of whitespace with single spaces and trim
pub fn normalize_whitespace(text: &str) -> String {
    let whitespace_pattern = regex::Regex::new(r"\s+").unwrap();
    whitespace_pattern.replace_all(text, " ").trim().to_string()
}

/// Strip markdown structure, keeping the readable prose
fn strip_markdown(content: &str) -> String {
    let rules: &[(&str, &str)] = &[
        (r"(?m)^#+\s+", ""),        // headers
        (r"\*\*(.*?)\*\*", "$1"),   // bold
        (r"\*(.*?)\*", "$1"),       // italic
        (r"\[(.*?)\]\(.*?\)", "$1"), // links, keep the label
        (r"(?m)^-{3,}", ""),        // horizontal rules
        (r"https?://\S+", ""),      // bare URLs
    ];

    let mut text = content.to_string();
    for (pattern, replacement) in rules {
        let rule = regex::Regex::new(pattern).unwrap();
        text = rule.replace_all(&text, *replacement).to_string();
    }

    normalize_whitespace(&text)
}

/// Convert HTML to plain text and drop leftover URLs
fn strip_html(content: &str) -> String {
    let plain_text = html2text::from_read(content.as_bytes(), usize::MAX);

    let url_pattern = regex::Regex::new(r"https?://\S+").unwrap();
    let without_urls = url_pattern.replace_all(&plain_text, "");

    normalize_whitespace(&without_urls)
}
