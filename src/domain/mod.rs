pub mod download;
pub mod session;
pub mod text;
pub mod voice;
