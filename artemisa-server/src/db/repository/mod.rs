//! Repository Module
//!
//! Free functions over `&SqlitePool`, one module per table. Mutations that
//! must be atomic (stock decrements, consecutive allocation) are single
//! UPDATE/INSERT statements or run inside one transaction; correctness
//! depends on the storage layer, never on in-process state.

pub mod admin;
pub mod product;
pub mod sale;
pub mod stats;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // Surface unique-constraint hits (email, code, consecutive) as
            // conflicts rather than opaque database failures
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
