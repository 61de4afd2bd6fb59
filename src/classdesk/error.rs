use crate::validate::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassdeskError {
    #[error("{0}")]
    Validation(ValidationError),

    #[error("Student not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl From<ValidationError> for ClassdeskError {
    fn from(err: ValidationError) -> Self {
        ClassdeskError::Validation(err)
    }
}

pub type Result<T> = std::result::Result<T, ClassdeskError>;
