use crate::api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("IO/Terminal error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("API error: {0}")]
    ApiError(#[from] ApiError),

    #[error("Render error: {0}")]
    RenderError(String),
}
