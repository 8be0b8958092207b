//! Error handling module
//!
//! Centralized error type and its structured form for the presentation layer.

use serde::Serialize;

use crate::config::ConfigError;
use crate::domain::{DomainError, MoneyError};
use crate::persistence::PersistenceError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Rejected input
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid price: {0}")]
    Money(#[from] MoneyError),

    // Infrastructure
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Structured failure handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Domain(e) => e.code(),
            AppError::Money(_) => "invalid_price",
            AppError::Persistence(_) => "persistence_error",
            AppError::Config(_) => "config_error",
        }
    }

    /// Whether the caller's input was at fault
    pub fn is_client_error(&self) -> bool {
        match self {
            AppError::Domain(e) => e.is_client_error(),
            AppError::Money(_) => true,
            AppError::Persistence(_) | AppError::Config(_) => false,
        }
    }

    /// Human-readable reason, withheld for infrastructure failures
    pub fn details(&self) -> Option<String> {
        match self {
            AppError::Domain(e) => Some(e.to_string()),
            AppError::Money(e) => Some(e.to_string()),
            AppError::Persistence(_) | AppError::Config(_) => None,
        }
    }

    /// The structured form of this error.
    ///
    /// Infrastructure details are logged here and withheld from the response.
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            AppError::Persistence(e) => tracing::error!("Persistence error: {:?}", e),
            AppError::Config(e) => tracing::error!("Config error: {:?}", e),
            _ => {}
        }

        let error = match self {
            AppError::Persistence(_) => "Persistence error".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            _ => self.to_string(),
        };

        ErrorResponse {
            error,
            error_code: self.error_code().to_string(),
            details: self.details(),
        }
    }
}
