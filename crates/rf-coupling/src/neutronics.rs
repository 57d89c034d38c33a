//! Neutronics-only step execution.

use rf_core::PhaseTag;
use tracing::{info, warn};

use crate::runner::PhysicsRunner;
use crate::scheduler::StepOutcome;

/// Runs the transport phases of a neutronics-only burnup step.
#[derive(Clone, Debug)]
pub struct NeutronicsDriver {
    app_name: String,
}

impl NeutronicsDriver {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// First burnup step: one plain transport solve. There is no prior
    /// power history to correct for.
    pub fn execute_first<P: PhysicsRunner + ?Sized>(&self, physics: &mut P) -> StepOutcome {
        if !physics.has_app(&self.app_name) {
            warn!(app = %self.app_name, "neutronics sub-application not found, skipping phase");
            return StepOutcome::Failed;
        }

        info!(app = %self.app_name, "executing first neutronics calculation");
        self.run(physics, PhaseTag::Neutronics)
    }

    /// Later burnup steps: one burnup-corrected transport solve.
    pub fn execute_subsequent<P: PhysicsRunner + ?Sized>(&self, physics: &mut P) -> StepOutcome {
        if !physics.has_app(&self.app_name) {
            warn!(app = %self.app_name, "neutronics sub-application not found, skipping phase");
            return StepOutcome::Failed;
        }

        info!(app = %self.app_name, "executing corrected neutronics calculation");
        self.run(physics, PhaseTag::CorrectedNeutronics)
    }

    fn run<P: PhysicsRunner + ?Sized>(&self, physics: &mut P, phase: PhaseTag) -> StepOutcome {
        match physics.run_phase(phase, &[&self.app_name]) {
            Ok(true) => StepOutcome::Success,
            Ok(false) => {
                warn!(%phase, "neutronics phase reported solve failure");
                StepOutcome::Failed
            }
            Err(err) => {
                warn!(%phase, %err, "neutronics phase raised an unexpected error");
                StepOutcome::Failed
            }
        }
    }
}
