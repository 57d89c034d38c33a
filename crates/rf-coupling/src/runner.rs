//! Collaborator traits consumed by the scheduler.
//!
//! The scheduler never executes physics, moves fields, or talks to the
//! external solver itself; it drives these three seams. Every call is
//! treated as a collective, blocking operation replicated identically on
//! all cooperating processes, so implementations must not be gated on
//! process-local data.

use rf_core::{PhaseTag, TransferDirection};
use tracing::{debug, info};

use crate::error::CouplingResult;

/// Executes all sub-applications registered for a phase tag.
pub trait PhysicsRunner {
    /// True if a sub-application with this name is registered.
    fn has_app(&self, name: &str) -> bool;

    /// Run every sub-application registered for `phase`, restricted to
    /// the given names. Returns Ok(false) if any of them fails to solve.
    /// Callable any number of times per burnup step.
    fn run_phase(&mut self, phase: PhaseTag, apps: &[&str]) -> CouplingResult<bool>;
}

/// Executes a named directional transfer group, gated by a control signal.
pub trait TransferRunner {
    /// Copy/interpolate the group's fields iff `enabled`; silently no-op
    /// otherwise. Must be idempotent so gates can be swept closed every
    /// step.
    fn run_transfer(
        &mut self,
        group: &str,
        direction: TransferDirection,
        enabled: bool,
    ) -> CouplingResult<()>;
}

/// Pushes burnup step indices to the external solver.
pub trait StepNotifier {
    /// Fire-and-forget; must be called before any phase execution that
    /// depends on the solver's step-dependent state.
    fn notify_step(&mut self, step: u32, max_steps: u32);
}

/// Everything the scheduler needs from its environment, as one object.
///
/// Blanket-implemented for any type providing the three seams, so a
/// runtime (or a test mock) can implement them separately and be passed
/// to the scheduler whole.
pub trait Collaborators: PhysicsRunner + TransferRunner + StepNotifier {}

impl<T: PhysicsRunner + TransferRunner + StepNotifier + ?Sized> Collaborators for T {}

/// Step notifier that only reports through the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingStepNotifier;

impl StepNotifier for LoggingStepNotifier {
    fn notify_step(&mut self, step: u32, max_steps: u32) {
        info!(step, max_steps, "burnup step pushed to external solver");
    }
}

/// Step notifier that swallows notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStepNotifier;

impl StepNotifier for NullStepNotifier {
    fn notify_step(&mut self, step: u32, max_steps: u32) {
        debug!(step, max_steps, "step notification dropped");
    }
}
