//! Property tests for configuration validation and counter behavior.

use proptest::prelude::*;
use rf_core::{PhaseTag, TransferDirection};
use rf_coupling::{
    BurnupScheduler, CouplingConfig, CouplingResult, PhysicsRunner, StepNotifier, TransferRunner,
};

/// Plant whose phases fail according to a scripted pattern.
struct ScriptedPlant {
    has_apps: bool,
    fail_pattern: Vec<bool>,
    call_index: usize,
}

impl PhysicsRunner for ScriptedPlant {
    fn has_app(&self, _name: &str) -> bool {
        self.has_apps
    }

    fn run_phase(&mut self, _phase: PhaseTag, _apps: &[&str]) -> CouplingResult<bool> {
        let fail = self
            .fail_pattern
            .get(self.call_index % self.fail_pattern.len().max(1))
            .copied()
            .unwrap_or(false);
        self.call_index += 1;
        Ok(!fail)
    }
}

impl TransferRunner for ScriptedPlant {
    fn run_transfer(
        &mut self,
        _group: &str,
        _direction: TransferDirection,
        _enabled: bool,
    ) -> CouplingResult<()> {
        Ok(())
    }
}

impl StepNotifier for ScriptedPlant {
    fn notify_step(&mut self, _step: u32, _max_steps: u32) {}
}

proptest! {
    #[test]
    fn construction_accepts_iff_initial_within_max(initial in 0u32..200, max in 1u32..200) {
        let config = CouplingConfig {
            burn_step: initial,
            max_burn_steps: max,
            ..Default::default()
        };
        let built = BurnupScheduler::new(config);
        prop_assert_eq!(built.is_ok(), initial <= max);
    }

    #[test]
    fn counter_is_monotone_regardless_of_outcomes(
        initial in 0u32..4,
        steps in 1usize..8,
        fail_pattern in proptest::collection::vec(any::<bool>(), 1..6),
        has_apps in any::<bool>(),
    ) {
        let config = CouplingConfig {
            burn_step: initial,
            max_burn_steps: 100,
            max_coupling_iterations: 2,
            ..Default::default()
        };
        let mut sched = BurnupScheduler::new(config).unwrap();
        let mut plant = ScriptedPlant { has_apps, fail_pattern, call_index: 0 };

        for k in 0..steps {
            sched.execute_step(&mut plant);
            prop_assert_eq!(sched.burn_step(), initial + k as u32 + 1);
        }
    }
}
