//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

use sea_orm::{DbErr, SqlErr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Bad input shape or range, correctable by the user
    Validation(String),
    /// Uniqueness violation
    Duplicate(String),
    /// Resource missing, deleted, or owned by someone else
    NotFound,
    /// Login failure; deliberately does not say which field was wrong
    InvalidCredentials,
    /// External catalog failure
    Upstream(String),
    /// Store or other internal failure
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Maps a store error, turning unique-index violations into `Duplicate`.
    pub fn from_db_with_duplicate(e: DbErr, duplicate_msg: &str) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                DomainError::Duplicate(duplicate_msg.to_string())
            }
            _ => DomainError::from(e),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Validation(msg) => write!(f, "{}", msg),
            DomainError::Duplicate(msg) => write!(f, "{}", msg),
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::InvalidCredentials => write!(f, "Invalid credentials"),
            DomainError::Upstream(msg) => write!(f, "Catalog error: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        DomainError::Internal(e.to_string())
    }
}
