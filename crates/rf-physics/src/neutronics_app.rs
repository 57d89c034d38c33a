//! Neutronics sub-application: temperature in, power density out.

use rf_core::units::Temperature;
use rf_core::{FieldStore, MeshDims, PhaseTag, ScalarField};
use rf_kernel::PhysicsKernel;
use tracing::{debug, warn};
use uom::si::thermodynamic_temperature::kelvin;

use crate::error::PhysicsResult;
use crate::subapp::SubApp;

/// Field names used by the neutronics application.
pub const TEMPERATURE_FIELD: &str = "temperature";
pub const POWER_FIELD: &str = "power";

const PHASES: [PhaseTag; 3] = [
    PhaseTag::Neutronics,
    PhaseTag::PreNeutronics,
    PhaseTag::CorrectedNeutronics,
];

/// Transport solve driven by an injected kernel.
///
/// Consumes the local `temperature` field and produces the local `power`
/// field. The pre-burnup phase only validates the incoming temperature
/// field; the two transport tags run the kernel.
pub struct NeutronicsApp {
    name: String,
    dims: MeshDims,
    kernel: Box<dyn PhysicsKernel>,
    fields: FieldStore,
}

impl NeutronicsApp {
    pub fn new(
        name: impl Into<String>,
        dims: MeshDims,
        kernel: Box<dyn PhysicsKernel>,
        initial_temperature: Temperature,
    ) -> Self {
        let mut fields = FieldStore::new();
        fields.insert(
            TEMPERATURE_FIELD,
            ScalarField::filled(dims, initial_temperature.get::<kelvin>()),
        );
        fields.insert(POWER_FIELD, ScalarField::filled(dims, 0.0));
        Self {
            name: name.into(),
            dims,
            kernel,
            fields,
        }
    }

    fn run_kernel(&mut self) -> PhysicsResult<bool> {
        let temperature = self.fields.get(TEMPERATURE_FIELD)?.clone();
        let power = self.fields.get_mut(POWER_FIELD)?;
        match self.kernel.solve(self.dims, &temperature, power) {
            Ok(()) => Ok(true),
            Err(err) => {
                // A kernel fault is a solve failure, not a structural one.
                warn!(app = %self.name, %err, "transport kernel failed to solve");
                Ok(false)
            }
        }
    }
}

impl SubApp for NeutronicsApp {
    fn name(&self) -> &str {
        &self.name
    }

    fn phases(&self) -> &[PhaseTag] {
        &PHASES
    }

    fn solve(&mut self, phase: PhaseTag) -> PhysicsResult<bool> {
        match phase {
            PhaseTag::PreNeutronics => {
                // Input refresh only; the transport solve happens under
                // the other two tags.
                let ok = self
                    .fields
                    .get(TEMPERATURE_FIELD)?
                    .ensure_finite("neutronics input temperature")
                    .is_ok();
                if !ok {
                    warn!(app = %self.name, "non-finite temperature input");
                }
                Ok(ok)
            }
            PhaseTag::Neutronics | PhaseTag::CorrectedNeutronics => {
                debug!(app = %self.name, %phase, kernel = self.kernel.name(), "running transport solve");
                self.run_kernel()
            }
            other => {
                debug!(app = %self.name, phase = %other, "phase not handled by neutronics app");
                Ok(true)
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
