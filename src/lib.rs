//! Client for a text-to-speech web service: splits text into
//! sentence-bounded segments, converts them remotely, plays the audio back
//! strictly in order and merges it into a downloadable file.

pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
