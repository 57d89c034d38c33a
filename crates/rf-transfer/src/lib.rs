//! rf-transfer: gated field transfers between parent and sub-applications.
//!
//! A transfer moves one named field between the parent application store
//! and a sub-application store, in a declared direction, either by
//! whole-field copy or by flat-index interpolation. Every transfer sits
//! behind a gate: when the gate is inactive the transfer is a silent
//! no-op, and disabling it repeatedly is idempotent, so a control layer
//! can sweep gates closed at the start of every step without tracking
//! their state.

pub mod error;
pub mod gate;
pub mod set;
pub mod transfer;

pub use error::{TransferError, TransferResult};
pub use gate::TransferGate;
pub use set::TransferSet;
pub use transfer::{FieldTransfer, TransferKind, TransferSpec};
