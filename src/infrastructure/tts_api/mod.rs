pub mod api;
pub mod http;

pub use api::TtsApi;
pub use http::HttpTtsApi;
