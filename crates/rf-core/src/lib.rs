//! rf-core: stable foundation for reactorflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - phase (execution phase tags + transfer directions)
//! - field (mesh dimensions + flat scalar fields + named stores)
//! - error (shared error types)

pub mod error;
pub mod field;
pub mod numeric;
pub mod phase;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RfError, RfResult};
pub use field::{FieldStore, MeshDims, ScalarField};
pub use numeric::*;
pub use phase::{PhaseTag, TransferDirection};
pub use units::*;
