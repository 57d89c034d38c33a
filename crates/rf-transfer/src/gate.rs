//! Boolean control gate for transfer activation.

use tracing::debug;

/// Control signal deciding whether a transfer executes.
///
/// Replaces a postprocessor-value indirection with a plain boolean:
/// 0/inactive means the transfer silently no-ops. Gates start inactive
/// so nothing moves until a control layer opens them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransferGate {
    active: bool,
}

impl TransferGate {
    pub fn new(initially_active: bool) -> Self {
        Self {
            active: initially_active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Set the gate state. Setting the same state again is a no-op.
    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            debug!(active, "transfer gate switched");
        }
        self.active = active;
    }
}
