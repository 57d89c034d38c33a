//! Coupled neutronics-thermal step execution.

use rf_core::PhaseTag;
use tracing::{info, warn};

use crate::config::CouplingConfig;
use crate::runner::PhysicsRunner;
use crate::scheduler::StepOutcome;

/// Runs the coupled phases of a burnup step: the simplified first-step
/// sequence and the fixed-point loop for every step after it.
#[derive(Clone, Debug)]
pub struct CoupledDriver {
    neutronics_app: String,
    thermal_app: String,
    max_coupling_iterations: u32,
    coupling_tolerance: f64,
    accept_on_max_iteration: bool,
}

impl CoupledDriver {
    pub fn from_config(config: &CouplingConfig) -> Self {
        Self {
            neutronics_app: config.neutronics_app.clone(),
            thermal_app: config.thermal_app.clone(),
            max_coupling_iterations: config.max_coupling_iterations,
            coupling_tolerance: config.coupling_tolerance,
            accept_on_max_iteration: config.accept_on_max_iteration,
        }
    }

    fn check_apps<P: PhysicsRunner + ?Sized>(&self, physics: &P) -> bool {
        let has_neutronics = physics.has_app(&self.neutronics_app);
        let has_thermal = physics.has_app(&self.thermal_app);
        if !has_neutronics || !has_thermal {
            warn!(
                neutronics = %self.neutronics_app,
                thermal = %self.thermal_app,
                has_neutronics,
                has_thermal,
                "required sub-applications not found, skipping coupled step"
            );
            return false;
        }
        true
    }

    /// First burnup step: corrected neutronics then thermal, once each.
    ///
    /// With no prior temperature field to seed the loop there is nothing
    /// to iterate against, so the first step is a straight two-phase
    /// sequence.
    pub fn execute_first<P: PhysicsRunner + ?Sized>(&self, physics: &mut P) -> StepOutcome {
        if !self.check_apps(physics) {
            return StepOutcome::Failed;
        }

        info!("executing first coupled neutronics-thermal calculation");

        match self.run_pair(
            physics,
            PhaseTag::CorrectedNeutronics,
            &self.neutronics_app,
            PhaseTag::Thermal,
            &self.thermal_app,
        ) {
            Some(outcome) => outcome,
            None => StepOutcome::Success,
        }
    }

    /// Later burnup steps: the neutronics/thermal fixed-point loop.
    pub fn execute_subsequent<P: PhysicsRunner + ?Sized>(&self, physics: &mut P) -> StepOutcome {
        if !self.check_apps(physics) {
            return StepOutcome::Failed;
        }

        info!(
            max_iterations = self.max_coupling_iterations,
            "executing coupled fixed-point iteration"
        );

        let mut iter = 0u32;
        // TODO: feed TemperatureConvergence::relative_change into this
        // metric between iterations. Until that wiring lands the value
        // stays at its unevaluated sentinel, the tolerance test below can
        // never pass, and the loop always runs to the iteration cap.
        let convergence_metric = 1.0f64;

        while iter < self.max_coupling_iterations && convergence_metric > self.coupling_tolerance {
            iter += 1;
            info!(iteration = iter, "coupling iteration");

            if let Some(outcome) = self.run_pair(
                physics,
                PhaseTag::Neutronics,
                &self.neutronics_app,
                PhaseTag::Thermal,
                &self.thermal_app,
            ) {
                return outcome;
            }
        }

        if iter >= self.max_coupling_iterations {
            warn!(
                iterations = iter,
                metric = convergence_metric,
                tolerance = self.coupling_tolerance,
                "reached max coupling iterations without convergence"
            );
            return StepOutcome::MaxIterations {
                accepted: self.accept_on_max_iteration,
            };
        }

        StepOutcome::Success
    }

    /// Run two phases back to back. Returns Some(Failed) as soon as one
    /// fails so the remainder of the sequence is abandoned; None means
    /// both phases succeeded.
    fn run_pair<P: PhysicsRunner + ?Sized>(
        &self,
        physics: &mut P,
        first: PhaseTag,
        first_app: &str,
        second: PhaseTag,
        second_app: &str,
    ) -> Option<StepOutcome> {
        for (phase, app) in [(first, first_app), (second, second_app)] {
            match physics.run_phase(phase, &[app]) {
                Ok(true) => {}
                Ok(false) => {
                    warn!(%phase, "coupled phase reported solve failure");
                    return Some(StepOutcome::Failed);
                }
                Err(err) => {
                    // Collaborator faults stop the step here instead of
                    // unwinding through the scheduler.
                    warn!(%phase, %err, "coupled phase raised an unexpected error");
                    return Some(StepOutcome::Failed);
                }
            }
        }
        None
    }
}
