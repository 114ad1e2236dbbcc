use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("segment {index} conversion failed: {message}")]
    Segment { index: usize, message: String },
    #[error("playback failed: {0}")]
    Playback(String),
    #[error("session cancelled")]
    Cancelled,
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Invalid(msg) => AppError::BadRequest(msg),
            SessionError::Segment { index, message } => {
                AppError::SegmentConversion { index, message }
            }
            SessionError::Playback(msg) => AppError::Playback(msg),
            SessionError::Cancelled => AppError::Cancelled,
            SessionError::Dependency(msg) => AppError::ExternalService(msg),
        }
    }
}
