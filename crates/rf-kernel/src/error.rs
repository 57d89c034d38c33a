//! Error types for kernel invocations.

use thiserror::Error;

/// Errors reported while driving a numerical kernel.
#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Field size mismatch: expected {expected} entries, got {got}")]
    SizeMismatch { expected: usize, got: usize },

    #[error("Non-physical kernel output: {what}")]
    NonPhysical { what: &'static str },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type KernelResult<T> = Result<T, KernelError>;

impl From<rf_core::RfError> for KernelError {
    fn from(e: rf_core::RfError) -> Self {
        KernelError::Backend {
            message: e.to_string(),
        }
    }
}
