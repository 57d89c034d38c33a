//! Error types for sub-application execution.

use thiserror::Error;

/// Errors raised while registering or executing sub-applications.
#[derive(Error, Debug)]
pub enum PhysicsError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Duplicate sub-application name: {name}")]
    DuplicateApp { name: String },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;

impl From<rf_core::RfError> for PhysicsError {
    fn from(e: rf_core::RfError) -> Self {
        PhysicsError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<rf_kernel::KernelError> for PhysicsError {
    fn from(e: rf_kernel::KernelError) -> Self {
        PhysicsError::Backend {
            message: e.to_string(),
        }
    }
}
