//! Centralized error handling.
//!
//! Provides a unified error type for the whole crate. Every failure
//! carries a stable code and a message naming the violated constraint.

use thiserror::Error;

use crate::config::{MAX_SALT_ROUNDS, MIN_SALT_ROUNDS};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Credentials
    #[error("Password must be at least {min_length} characters long")]
    WeakSecret { min_length: usize },

    #[error("Password must be at most {max_bytes} bytes long")]
    SecretTooLong { max_bytes: usize },

    #[error("Password cannot be empty")]
    EmptySecret,

    #[error("Password must be hashed using bcrypt format")]
    InvalidDigestFormat,

    // Configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // Migrations
    #[error("Migration file {0} not found, cannot revert")]
    MissingMigrationFile(String),

    #[error("Migration {0} does not define a -- down block")]
    NoDownBlock(String),

    #[error("Migration {name} failed: {source}")]
    MigrationFailed {
        name: String,
        #[source]
        source: Box<AppError>,
    },

    // CLI
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("{0} already exists")]
    Conflict(String),

    // External errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get a stable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::WeakSecret { .. } => "WEAK_SECRET",
            AppError::SecretTooLong { .. } => "SECRET_TOO_LONG",
            AppError::EmptySecret => "EMPTY_SECRET",
            AppError::InvalidDigestFormat => "INVALID_DIGEST_FORMAT",
            AppError::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            AppError::MissingMigrationFile(_) => "MISSING_MIGRATION_FILE",
            AppError::NoDownBlock(_) => "NO_DOWN_BLOCK",
            AppError::MigrationFailed { .. } => "MIGRATION_FAILED",
            AppError::UnsupportedAction(_) => "UNSUPPORTED_ACTION",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        AppError::InvalidConfiguration(msg.into())
    }

    /// Salt rounds outside the accepted bounds or not a number.
    pub fn salt_rounds_out_of_range(raw: &str) -> Self {
        AppError::InvalidConfiguration(format!(
            "PASSWORD_SALT_ROUNDS must be a number between {} and {}, got '{}'",
            MIN_SALT_ROUNDS, MAX_SALT_ROUNDS, raw
        ))
    }

    pub fn migration_failed(name: impl Into<String>, source: AppError) -> Self {
        AppError::MigrationFailed {
            name: name.into(),
            source: Box::new(source),
        }
    }
}
