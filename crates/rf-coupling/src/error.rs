//! Error types for coupling control.

use thiserror::Error;

/// Errors surfaced by the coupling scheduler and its collaborators.
#[derive(Error, Debug)]
pub enum CouplingError {
    /// Construction-time invariant violation; fatal before any step runs.
    #[error("Configuration error: {what}")]
    Config { what: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown calculation type: {raw} (expected 1=neutronics-only, 2=coupled)")]
    UnknownCalcType { raw: u32 },

    /// Unexpected collaborator fault, converted to a step failure at the
    /// coupled-execution boundary.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type CouplingResult<T> = Result<T, CouplingError>;

impl From<rf_core::RfError> for CouplingError {
    fn from(e: rf_core::RfError) -> Self {
        CouplingError::Backend {
            message: e.to_string(),
        }
    }
}
