//! SubApp trait for coordinated physics models.

use rf_core::{FieldStore, PhaseTag};

use crate::error::PhysicsResult;

/// An independently solved physics model coordinated by the parent
/// simulation.
///
/// A sub-application owns its local fields and declares the phase tags
/// it responds to. `solve` is only invoked with tags from `phases()`;
/// it returns Ok(false) for a solve failure (recoverable at the step
/// level) and Err for structural faults such as missing fields.
pub trait SubApp {
    fn name(&self) -> &str;

    /// Phase tags this application is registered for.
    fn phases(&self) -> &[PhaseTag];

    /// Execute one solve for the given phase.
    fn solve(&mut self, phase: PhaseTag) -> PhysicsResult<bool>;

    /// Local field store (inputs and outputs of the solve).
    fn fields(&self) -> &FieldStore;

    fn fields_mut(&mut self) -> &mut FieldStore;
}
