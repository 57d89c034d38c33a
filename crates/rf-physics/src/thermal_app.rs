//! Thermal sub-application: power density in, temperature out.

use rf_core::units::Temperature;
use rf_core::{FieldStore, MeshDims, PhaseTag, ScalarField};
use rf_kernel::PhysicsKernel;
use tracing::{debug, warn};
use uom::si::thermodynamic_temperature::kelvin;

use crate::error::PhysicsResult;
use crate::subapp::SubApp;

/// Field names used by the thermal application.
pub const POWER_FIELD: &str = "power";
pub const TEMPERATURE_FIELD: &str = "temperature";

const PHASES: [PhaseTag; 1] = [PhaseTag::Thermal];

/// Heat-deposition solve driven by an injected kernel.
///
/// Consumes the local `power` field and produces the local `temperature`
/// field, which starts at the supplied initial temperature until the
/// first solve overwrites it.
pub struct ThermalApp {
    name: String,
    dims: MeshDims,
    kernel: Box<dyn PhysicsKernel>,
    fields: FieldStore,
}

impl ThermalApp {
    pub fn new(
        name: impl Into<String>,
        dims: MeshDims,
        kernel: Box<dyn PhysicsKernel>,
        initial_temperature: Temperature,
    ) -> Self {
        let mut fields = FieldStore::new();
        fields.insert(POWER_FIELD, ScalarField::filled(dims, 0.0));
        fields.insert(
            TEMPERATURE_FIELD,
            ScalarField::filled(dims, initial_temperature.get::<kelvin>()),
        );
        Self {
            name: name.into(),
            dims,
            kernel,
            fields,
        }
    }
}

impl SubApp for ThermalApp {
    fn name(&self) -> &str {
        &self.name
    }

    fn phases(&self) -> &[PhaseTag] {
        &PHASES
    }

    fn solve(&mut self, phase: PhaseTag) -> PhysicsResult<bool> {
        if phase != PhaseTag::Thermal {
            debug!(app = %self.name, %phase, "phase not handled by thermal app");
            return Ok(true);
        }

        debug!(app = %self.name, kernel = self.kernel.name(), "running thermal solve");
        let power = self.fields.get(POWER_FIELD)?.clone();
        let temperature = self.fields.get_mut(TEMPERATURE_FIELD)?;
        match self.kernel.solve(self.dims, &power, temperature) {
            Ok(()) => Ok(true),
            Err(err) => {
                warn!(app = %self.name, %err, "thermal kernel failed to solve");
                Ok(false)
            }
        }
    }

    fn fields(&self) -> &FieldStore {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut FieldStore {
        &mut self.fields
    }
}
