/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Voice catalog unavailable: {0}")]
    CatalogLoad(String),

    #[error("Segment {index} conversion failed: {message}")]
    SegmentConversion { index: usize, message: String },

    #[error("Playback failed: {0}")]
    Playback(String),

    #[error("Conversion cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl AppError {
    /// Process exit code for this error. Usage and configuration mistakes
    /// exit with 2, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::BadRequest(_) => 2,
            _ => 1,
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
