pub mod chunker;
pub mod cleaner;

pub use chunker::{split_into_segments, DEFAULT_MAX_SEGMENT_CHARS};
pub use cleaner::{extract_text, normalize_whitespace};
