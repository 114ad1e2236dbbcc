pub mod audio;
pub mod config;
pub mod tts_api;
