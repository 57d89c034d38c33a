//! Error types for field transfer operations.

use thiserror::Error;

/// Errors encountered while declaring or executing transfers.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Duplicate transfer name: {name}")]
    DuplicateName { name: String },

    #[error("Copy size mismatch for transfer '{name}': source {source_len}, destination {dest_len}")]
    CopySizeMismatch {
        name: String,
        source_len: usize,
        dest_len: usize,
    },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type TransferResult<T> = Result<T, TransferError>;

impl From<rf_core::RfError> for TransferError {
    fn from(e: rf_core::RfError) -> Self {
        TransferError::Backend {
            message: e.to_string(),
        }
    }
}
