use thiserror::Error;
use uuid::Uuid;

/// Recoverable failures raised by the finance services.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FinanceError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Record not found: {0}")]
    RecordNotFound(Uuid),
}

impl FinanceError {
    pub fn validation(message: impl Into<String>) -> Self {
        FinanceError::Validation(message.into())
    }
}
