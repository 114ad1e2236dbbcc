/// Default maximum characters per conversion segment
pub const DEFAULT_MAX_SEGMENT_CHARS: usize = 800;

/// Split text into segments that respect sentence boundaries
///
/// Sentences end at runs of `.`, `!` or `?` followed by whitespace (or end
/// of input). Consecutive sentences are packed greedily into one segment
/// while the accumulated length stays within `max_chars`. A single sentence
/// longer than the bound is emitted whole rather than split mid-sentence.
/// Input with no sentence boundary at all is treated as one unit.
///
/// Total over any input: empty or whitespace-only text yields no segments,
/// everything else yields at least one. Segment order is input order.
pub fn split_into_segments(text: &str, max_chars: usize) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for unit in split_sentences(trimmed) {
        let unit_chars = unit.chars().count();

        // Close the running segment once the next sentence would overflow it
        if !current.is_empty() && current_chars + unit_chars > max_chars {
            segments.push(current.trim().to_string());
            current = String::new();
            current_chars = 0;
        }

        current.push_str(unit);
        current_chars += unit_chars;
    }

    if !current.trim().is_empty() {
        segments.push(current.trim().to_string());
    }

    segments
}

/// Split into sentence-like units, each keeping its terminator and trailing
/// whitespace so that concatenating the units reproduces the input.
fn split_sentences(text: &str) -> Vec<&str> {
    let boundary = regex::Regex::new(r"[.!?]+\s+").unwrap();

    let mut units = Vec::new();
    let mut last_end = 0;
    for mat in boundary.find_iter(text) {
        units.push(&text[last_end..mat.end()]);
        last_end = mat.end();
    }

    // Remaining text after the last boundary (or the whole input when there
    // is no boundary)
    if last_end < text.len() {
        units.push(&text[last_end..]);
    }

    units
}
