//! # Domain Errors
//!
//! Error types for the Record Store.
//!
//! ## Design Principles
//!
//! - A conflict is an expected outcome, kept apart from store faults
//! - Store faults carry detail for logs; the service boundary decides what
//!   to show callers
//! - No panics in domain logic (use Result instead)

use thiserror::Error;

/// Persistence failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Underlying database could not complete the operation.
    #[error("Database error: {message}")]
    Database { message: String },

    /// A stored record could not be encoded or decoded.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Why an admission did not take effect.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdmitError {
    /// A live record for the pair has a strictly newer body timestamp.
    #[error("Newer entry already exists")]
    NewerEntryExists,

    /// The existence check or the replace unit failed.
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

/// Key-value store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

impl From<KVStoreError> for StoreError {
    fn from(err: KVStoreError) -> Self {
        StoreError::Database {
            message: err.to_string(),
        }
    }
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        StoreError::Serialization {
            message: err.to_string(),
        }
    }
}
