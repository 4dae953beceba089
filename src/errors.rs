//! Unified error type for the retail ledger.
//!
//! Every operation returns [`Result`]. Input problems are reported before the store is
//! touched; uniqueness problems are reported by the store itself and translated into
//! [`Error::Duplicate`] here.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// All failures surfaced by the ledger, catalog, and directory operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range input, caught before any store mutation
    #[error("Invalid input: {message}")]
    Validation {
        /// Human-readable description of the offending field
        message: String,
    },

    /// A uniqueness constraint was violated at the store
    #[error("{entity} '{key}' already exists")]
    Duplicate {
        /// Kind of record that collided (e.g. "SKU", "Customer")
        entity: &'static str,
        /// The conflicting key value
        key: String,
    },

    /// A referenced record does not exist
    #[error("{entity} '{key}' not found")]
    NotFound {
        /// Kind of record looked up
        entity: &'static str,
        /// The key that was looked up
        key: String,
    },

    /// Attendance was already recorded for this employee on this day
    #[error("Employee {employee_id} is already marked present for {date}")]
    AlreadyMarked {
        /// Employee that was re-marked
        employee_id: i64,
        /// Calendar day of the existing record
        date: chrono::NaiveDate,
    },

    /// The session's role does not carry the capability the operation needs
    #[error("Role {role} is not permitted to {action}")]
    Forbidden {
        /// Role of the calling session
        role: String,
        /// Description of the denied action
        action: String,
    },

    /// Unknown username or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Image copy into the managed asset directory failed
    #[error("Asset error for {path}: {source}")]
    Asset {
        /// Source image path supplied by the caller
        path: String,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Password hashing failure
    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// Description from the hasher
        message: String,
    },

    /// Underlying store unavailable or query failure
    #[error("Storage error: {0}")]
    Storage(#[from] DbErr),

    /// Report or notification log I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds a [`Error::Validation`] from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Translates a store error, turning unique-constraint violations into
    /// [`Error::Duplicate`] for the given entity and key.
    pub fn from_insert(err: DbErr, entity: &'static str, key: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Duplicate {
                entity,
                key: key.into(),
            },
            _ => Self::Storage(err),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
