//! App-level error surface.
//!
//! Domain validation failures pass through unchanged so screens can report the
//! exact field that blocked an action.

use agricontract_config::ConfigError;
use agricontract_domain::DomainError;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("runtime unavailable: {0}")]
    RuntimeUnavailable(String),
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn runtime_unavailable(message: impl Into<String>) -> Self {
        Self::RuntimeUnavailable(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Validation(DomainError::rejected(message))
    }

    pub fn as_validation(&self) -> Option<&DomainError> {
        match self {
            Self::Validation(error) => Some(error),
            _ => None,
        }
    }

    pub fn configuration_message(&self) -> Option<&str> {
        match self {
            Self::Configuration(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::configuration(value.to_string())
    }
}
