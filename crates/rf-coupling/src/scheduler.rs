//! Burnup-step scheduler: state machine and step dispatch.

use rf_core::TransferDirection;
use tracing::{info, warn};

use crate::config::{CalcMode, CouplingConfig};
use crate::coupled::CoupledDriver;
use crate::error::{CouplingError, CouplingResult};
use crate::neutronics::NeutronicsDriver;
use crate::runner::Collaborators;

/// Outcome of one burnup step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    /// The coupling loop exhausted its iteration budget. Not an error:
    /// `accepted` records whether the configuration accepts the solution
    /// outright or flags it as warning-only.
    MaxIterations { accepted: bool },
    Failed,
}

impl StepOutcome {
    /// Everything except an outright failure counts as a completed step.
    pub fn is_success(&self) -> bool {
        !matches!(self, StepOutcome::Failed)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed)
    }
}

/// Drives the burnup-step loop of a depletion calculation.
///
/// One external invocation of [`execute_step`](Self::execute_step)
/// handles exactly one burnup step and then advances the internal step
/// counter; the host's time-stepping loop is expected to call it once per
/// time step. Three step classes get materially different treatment:
///
/// - step 0: initialization placeholder, nothing executes;
/// - step 1: first-step sequences (no prior temperature/power field
///   exists to seed the other physics);
/// - step >= 2: corrected neutronics, or the coupled fixed-point loop.
///
/// The scheduler owns the step counter exclusively. Components that need
/// the current step read it through [`burn_step`](Self::burn_step) or
/// receive it in progress reports; there is no shared mutable step state.
pub struct BurnupScheduler {
    config: CouplingConfig,
    calc_type: CalcMode,
    burn_step: u32,
    neutronics: NeutronicsDriver,
    coupled: CoupledDriver,
}

impl BurnupScheduler {
    /// Validate the configuration and build the scheduler. A
    /// configuration invariant violation is fatal here, before any step
    /// can execute.
    pub fn new(config: CouplingConfig) -> CouplingResult<Self> {
        config.validate()?;
        let neutronics = NeutronicsDriver::new(config.neutronics_app.clone());
        let coupled = CoupledDriver::from_config(&config);
        Ok(Self {
            calc_type: config.calc_type,
            burn_step: config.burn_step,
            config,
            neutronics,
            coupled,
        })
    }

    pub fn config(&self) -> &CouplingConfig {
        &self.config
    }

    pub fn calc_type(&self) -> CalcMode {
        self.calc_type
    }

    /// Switch calculation mode for subsequent steps. Raw integer inputs
    /// go through [`CalcMode::from_raw`], which rejects anything outside
    /// the known modes.
    pub fn set_calc_type(&mut self, mode: CalcMode) {
        info!(%mode, "calculation type changed");
        self.calc_type = mode;
    }

    pub fn burn_step(&self) -> u32 {
        self.burn_step
    }

    pub fn max_burn_steps(&self) -> u32 {
        self.config.max_burn_steps
    }

    /// Explicitly reposition the step counter, re-checking the step
    /// invariant.
    pub fn set_burn_step(&mut self, step: u32) -> CouplingResult<()> {
        if step > self.config.max_burn_steps {
            return Err(CouplingError::Config {
                what: format!(
                    "burnup step ({step}) cannot exceed max burnup steps ({})",
                    self.config.max_burn_steps
                ),
            });
        }
        self.burn_step = step;
        Ok(())
    }

    /// Execute the current burnup step, then advance the counter.
    ///
    /// The counter advances by exactly one whether or not the step
    /// succeeded; a failed step is reported to the caller, never retried
    /// here.
    pub fn execute_step<C: Collaborators + ?Sized>(&mut self, collab: &mut C) -> StepOutcome {
        self.reset_transfer_gates(collab);

        let outcome = match self.burn_step {
            0 => {
                info!("burnup step 0: initialization only, no physics executed");
                StepOutcome::Success
            }
            1 => self.execute_first_step(collab),
            _ => self.execute_subsequent_step(collab),
        };

        if outcome.is_failure() {
            warn!(step = self.burn_step, "burnup step failed");
        } else {
            info!(step = self.burn_step, "burnup step completed");
        }

        self.burn_step += 1;
        outcome
    }

    /// Sweep every coupling transfer gate closed before the step runs.
    /// Disabled transfers are no-ops, so the sweep is idempotent; a
    /// failing reset is logged and does not stop the step.
    fn reset_transfer_gates<C: Collaborators + ?Sized>(&self, collab: &mut C) {
        let groups = &self.config.transfer_groups;
        let sweep = [
            (groups.to_neutronics.as_str(), TransferDirection::ToSubApp),
            (groups.from_neutronics.as_str(), TransferDirection::FromSubApp),
            (groups.to_thermal.as_str(), TransferDirection::ToSubApp),
            (groups.from_thermal.as_str(), TransferDirection::FromSubApp),
        ];
        for (group, direction) in sweep {
            if let Err(err) = collab.run_transfer(group, direction, false) {
                warn!(group, %direction, %err, "transfer gate reset failed");
            }
        }
    }

    fn execute_first_step<C: Collaborators + ?Sized>(&mut self, collab: &mut C) -> StepOutcome {
        info!(
            step = self.burn_step,
            calc_type = %self.calc_type,
            "executing first burnup step"
        );
        collab.notify_step(self.burn_step, self.config.max_burn_steps);

        match self.calc_type {
            CalcMode::NeutronicsOnly => self.neutronics.execute_first(collab),
            CalcMode::Coupled => self.coupled.execute_first(collab),
        }
    }

    fn execute_subsequent_step<C: Collaborators + ?Sized>(&mut self, collab: &mut C) -> StepOutcome {
        info!(
            step = self.burn_step,
            calc_type = %self.calc_type,
            "executing subsequent burnup step"
        );
        collab.notify_step(self.burn_step, self.config.max_burn_steps);

        match self.calc_type {
            CalcMode::NeutronicsOnly => self.neutronics.execute_subsequent(collab),
            CalcMode::Coupled => self.coupled.execute_subsequent(collab),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates_config() {
        let config = CouplingConfig {
            burn_step: 99,
            max_burn_steps: 10,
            ..Default::default()
        };
        assert!(BurnupScheduler::new(config).is_err());
    }

    #[test]
    fn calc_type_setter_is_observable() {
        let mut scheduler = BurnupScheduler::new(CouplingConfig::default()).unwrap();
        assert_eq!(scheduler.calc_type(), CalcMode::Coupled);
        scheduler.set_calc_type(CalcMode::NeutronicsOnly);
        assert_eq!(scheduler.calc_type(), CalcMode::NeutronicsOnly);
    }

    #[test]
    fn set_burn_step_enforces_invariant() {
        let mut scheduler = BurnupScheduler::new(CouplingConfig::default()).unwrap();
        scheduler.set_burn_step(10).unwrap();
        assert_eq!(scheduler.burn_step(), 10);
        assert!(scheduler.set_burn_step(11).is_err());
    }

    #[test]
    fn outcome_classification() {
        assert!(StepOutcome::Success.is_success());
        assert!(StepOutcome::MaxIterations { accepted: true }.is_success());
        assert!(StepOutcome::MaxIterations { accepted: false }.is_success());
        assert!(StepOutcome::Failed.is_failure());
    }
}
