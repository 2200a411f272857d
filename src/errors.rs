use thiserror::Error;

use crate::{config::ConfigError, core::FinanceError, storage::PersistenceError};

/// Unified error type surfaced by the command-line front end.
#[derive(Error, Debug)]
pub enum SmartSpendError {
    #[error(transparent)]
    Finance(#[from] FinanceError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, SmartSpendError>;

impl SmartSpendError {
    pub fn input(message: impl Into<String>) -> Self {
        SmartSpendError::Input(message.into())
    }
}
