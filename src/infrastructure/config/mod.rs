use serde::Deserialize;
use std::env;

use crate::domain::session::StallPolicy;
use crate::domain::text::DEFAULT_MAX_SEGMENT_CHARS;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the TTS web service
    pub base_url: String,
    /// Default voice short name; the first catalog entry when unset
    pub voice: Option<String>,
    /// Maximum characters per conversion segment
    pub max_segment_chars: usize,
    /// What to do when the segment needed next has failed permanently
    pub stall_policy: StallPolicy,
    /// Per-process cache of synthesized segments
    pub cache_enabled: bool,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            base_url: env::var("READALOUD_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            voice: env::var("READALOUD_VOICE").ok(),
            max_segment_chars: env::var("READALOUD_MAX_SEGMENT_CHARS")
                .unwrap_or_else(|_| DEFAULT_MAX_SEGMENT_CHARS.to_string())
                .parse()?,
            stall_policy: env::var("READALOUD_STALL_POLICY")
                .unwrap_or_else(|_| "wait".to_string())
                .parse()?,
            cache_enabled: env::var("READALOUD_CACHE_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .parse::<String>()
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
        };

        Ok(config)
    }
}
