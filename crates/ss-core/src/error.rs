//! # AppError
//!
//! Centralized error handling for the SoulSync core.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all ss-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Post, Category, Account)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., empty title, malformed email)
    #[error("validation error: {0}")]
    Validation(String),

    /// Actor lacks the role or credentials for the operation
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists (e.g., duplicate email)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure surfaced by a plugin
    #[error("internal service error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// A specialized Result type for SoulSync logic.
pub type Result<T> = std::result::Result<T, AppError>;
