//! Error types for the rf-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides one interface for frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read campaign file: {path}")]
    CampaignFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write campaign file: {path}")]
    CampaignFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Campaign validation failed: {0}")]
    Validation(#[from] crate::campaign_file::ValidationError),

    #[error("Coupling error: {0}")]
    Coupling(String),

    #[error("Physics error: {0}")]
    Physics(String),

    #[error("Transfer error: {0}")]
    Transfer(String),

    #[error("Kernel error: {0}")]
    Kernel(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Campaign failed: {0}")]
    Campaign(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for rf-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<rf_coupling::CouplingError> for AppError {
    fn from(err: rf_coupling::CouplingError) -> Self {
        AppError::Coupling(err.to_string())
    }
}

impl From<rf_physics::PhysicsError> for AppError {
    fn from(err: rf_physics::PhysicsError) -> Self {
        AppError::Physics(err.to_string())
    }
}

impl From<rf_transfer::TransferError> for AppError {
    fn from(err: rf_transfer::TransferError) -> Self {
        AppError::Transfer(err.to_string())
    }
}

impl From<rf_kernel::KernelError> for AppError {
    fn from(err: rf_kernel::KernelError) -> Self {
        AppError::Kernel(err.to_string())
    }
}

impl From<rf_core::RfError> for AppError {
    fn from(err: rf_core::RfError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
