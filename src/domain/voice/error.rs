use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("voice list unavailable: {0}")]
    Unavailable(String),
    #[error("voice list is empty")]
    Empty,
    #[error("unknown voice: {0}")]
    UnknownVoice(String),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownVoice(name) => {
                AppError::BadRequest(format!("unknown voice: {name}"))
            }
            other => AppError::CatalogLoad(other.to_string()),
        }
    }
}
