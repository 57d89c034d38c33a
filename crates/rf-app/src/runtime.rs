//! Runtime wiring: the scheduler's collaborator seams bound to a real
//! registry, parent field store, and transfer set.

use std::collections::HashMap;

use rf_core::units::{d, k, mw};
use rf_core::{FieldStore, MeshDims, PhaseTag, ScalarField, TransferDirection};
use rf_coupling::{
    CouplingError, CouplingResult, LoggingStepNotifier, PhysicsRunner, StepNotifier,
    TemperatureConvergence, TransferRunner,
};
use rf_kernel::{FeedbackPowerKernel, LumpedConductionKernel};
use rf_physics::{AppRegistry, NeutronicsApp, ThermalApp};
use rf_transfer::{TransferKind, TransferSet, TransferSpec};
use tracing::{info, warn};
use uom::si::power::watt;
use uom::si::time::day;

use crate::campaign_file::{validate_campaign, CampaignFile, TransferKindDef};
use crate::error::AppResult;

/// Parent-side field names.
pub const PARENT_POWER_FIELD: &str = "power";
pub const PARENT_TEMPERATURE_FIELD: &str = "temperature";

/// Everything the scheduler talks to, in one object.
///
/// Implements the three collaborator seams: phase execution through the
/// registry, gated transfers between the parent store and sub-application
/// stores, and step notification through a pluggable notifier. Also
/// keeps per-phase call counters and the temperature-convergence history
/// for observers.
pub struct CouplingRuntime {
    registry: AppRegistry,
    parent_fields: FieldStore,
    transfers: TransferSet,
    notifier: Box<dyn StepNotifier>,
    convergence: TemperatureConvergence,
    thermal_app: String,
    phase_calls: HashMap<PhaseTag, usize>,
}

impl CouplingRuntime {
    pub fn new(
        registry: AppRegistry,
        parent_fields: FieldStore,
        transfers: TransferSet,
        notifier: Box<dyn StepNotifier>,
        thermal_app: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            parent_fields,
            transfers,
            notifier,
            convergence: TemperatureConvergence::new(),
            thermal_app: thermal_app.into(),
            phase_calls: HashMap::new(),
        }
    }

    /// Wire the demo kernels, sub-applications, parent fields, and
    /// transfers described by a campaign file.
    pub fn from_campaign(file: &CampaignFile) -> AppResult<Self> {
        validate_campaign(file)?;

        let dims = MeshDims::new(file.mesh.nx, file.mesh.ny, file.mesh.nz)?;
        let sched = &file.scheduler;
        let physics = &file.physics;

        let span = d(physics.step_length_days) * sched.max_burn_steps as f64;
        info!(
            campaign = %file.name,
            steps = sched.max_burn_steps,
            span_days = span.get::<day>(),
            "building coupling runtime"
        );

        let mut registry = AppRegistry::new();

        let power_kernel = FeedbackPowerKernel::new(
            mw(physics.rated_power_mw).get::<watt>(),
            physics.initial_temperature_k,
        )?;
        registry.register(Box::new(NeutronicsApp::new(
            sched.neutronics_app.clone(),
            dims,
            Box::new(power_kernel),
            k(physics.initial_temperature_k),
        )))?;

        let thermal_kernel = LumpedConductionKernel::new(
            physics.sink_temperature_k,
            physics.thermal_resistance_k_per_w,
        )?;
        registry.register(Box::new(ThermalApp::new(
            sched.thermal_app.clone(),
            dims,
            Box::new(thermal_kernel),
            k(physics.initial_temperature_k),
        )))?;

        let mut parent_fields = FieldStore::new();
        parent_fields.insert(PARENT_POWER_FIELD, ScalarField::filled(dims, 0.0));
        parent_fields.insert(
            PARENT_TEMPERATURE_FIELD,
            ScalarField::filled(dims, physics.initial_temperature_k),
        );

        let mut transfers = TransferSet::new();
        for def in &file.transfers {
            transfers.add(TransferSpec {
                name: def.name.clone(),
                group: def.group.clone(),
                direction: def.direction,
                app: def.app.clone(),
                parent_field: def.parent_field.clone(),
                app_field: def.app_field.clone(),
                kind: match def.kind {
                    TransferKindDef::Copy => TransferKind::Copy,
                    TransferKindDef::Interpolate => TransferKind::Interpolate,
                },
            })?;
        }

        Ok(Self::new(
            registry,
            parent_fields,
            transfers,
            Box::new(LoggingStepNotifier),
            sched.thermal_app.clone(),
        ))
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    pub fn parent_fields(&self) -> &FieldStore {
        &self.parent_fields
    }

    pub fn convergence(&self) -> &TemperatureConvergence {
        &self.convergence
    }

    /// Number of times a phase was dispatched through this runtime.
    pub fn phase_call_count(&self, phase: PhaseTag) -> usize {
        self.phase_calls.get(&phase).copied().unwrap_or(0)
    }
}

impl PhysicsRunner for CouplingRuntime {
    fn has_app(&self, name: &str) -> bool {
        self.registry.has_app(name)
    }

    fn run_phase(&mut self, phase: PhaseTag, apps: &[&str]) -> CouplingResult<bool> {
        *self.phase_calls.entry(phase).or_insert(0) += 1;

        let ok = self
            .registry
            .exec_phase(phase, Some(apps))
            .map_err(|e| CouplingError::Backend {
                message: e.to_string(),
            })?;

        // Record the thermal result so the convergence history tracks
        // iteration-to-iteration temperature change.
        if ok && phase == PhaseTag::Thermal {
            if let Some(fields) = self.registry.app_fields(&self.thermal_app) {
                if let Some(temperature) = fields.try_get(rf_physics::thermal_app::TEMPERATURE_FIELD)
                {
                    self.convergence.update(temperature);
                }
            }
        }

        Ok(ok)
    }
}

impl TransferRunner for CouplingRuntime {
    fn run_transfer(
        &mut self,
        group: &str,
        direction: TransferDirection,
        enabled: bool,
    ) -> CouplingResult<()> {
        for transfer in self.transfers.group_iter_mut(group, direction) {
            transfer.set_active(enabled);
            if !enabled {
                continue;
            }

            let app_name = transfer.spec().app.clone();
            let Some(sub) = self.registry.app_fields_mut(&app_name) else {
                warn!(app = %app_name, transfer = %transfer.spec().name, "transfer target app missing");
                continue;
            };
            transfer
                .execute(&mut self.parent_fields, sub)
                .map_err(|e| CouplingError::Backend {
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }
}

impl StepNotifier for CouplingRuntime {
    fn notify_step(&mut self, step: u32, max_steps: u32) {
        self.notifier.notify_step(step, max_steps);
    }
}

/// Step notifier backed by the external native solver.
#[cfg(feature = "extern-solver")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ExternStepNotifier;

#[cfg(feature = "extern-solver")]
impl StepNotifier for ExternStepNotifier {
    fn notify_step(&mut self, step: u32, max_steps: u32) {
        rf_kernel::ffi::notify_burnup_step(step, max_steps);
    }
}
