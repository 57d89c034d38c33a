//! Built-in stand-in kernels for demos and tests.
//!
//! These are shape generators, not transport or conduction solvers: they
//! produce well-behaved, finite fields with the right qualitative response
//! (power falls where temperature rises, temperature rises where power is
//! deposited) so coupling workflows have meaningful data to move around.
//! Alternating the two is contractive, which gives convergence monitors a
//! shrinking field-change history to observe.

use rf_core::{MeshDims, ScalarField};
use tracing::debug;

use crate::error::{KernelError, KernelResult};
use crate::kernel::PhysicsKernel;

fn check_sizes(dims: MeshDims, input: &ScalarField, output: &ScalarField) -> KernelResult<()> {
    if input.len() != dims.len() {
        return Err(KernelError::SizeMismatch {
            expected: dims.len(),
            got: input.len(),
        });
    }
    if output.len() != dims.len() {
        return Err(KernelError::SizeMismatch {
            expected: dims.len(),
            got: output.len(),
        });
    }
    Ok(())
}

/// Temperature in, power density out.
///
/// Starts from a uniform rated power density and damps each entry linearly
/// with local temperature rise above a reference, then rescales so the
/// total stays at the rated level. The damping coefficient plays the role
/// of a negative temperature feedback.
#[derive(Clone, Debug)]
pub struct FeedbackPowerKernel {
    /// Total rated power (W), spread uniformly before feedback shaping.
    pub rated_power_w: f64,
    /// Reference temperature (K) at which no damping applies.
    pub reference_temperature_k: f64,
    /// Fractional power reduction per kelvin above reference.
    pub feedback_per_k: f64,
}

impl FeedbackPowerKernel {
    pub fn new(rated_power_w: f64, reference_temperature_k: f64) -> KernelResult<Self> {
        if rated_power_w <= 0.0 {
            return Err(KernelError::InvalidArg {
                what: "rated power must be positive",
            });
        }
        if reference_temperature_k <= 0.0 {
            return Err(KernelError::InvalidArg {
                what: "reference temperature must be positive",
            });
        }
        Ok(Self {
            rated_power_w,
            reference_temperature_k,
            feedback_per_k: 1.0e-4,
        })
    }

    pub fn with_feedback(mut self, per_k: f64) -> Self {
        self.feedback_per_k = per_k;
        self
    }
}

impl PhysicsKernel for FeedbackPowerKernel {
    fn name(&self) -> &str {
        "feedback-power"
    }

    fn solve(
        &mut self,
        dims: MeshDims,
        input: &ScalarField,
        output: &mut ScalarField,
    ) -> KernelResult<()> {
        check_sizes(dims, input, output)?;
        input.ensure_finite("temperature field")?;
        debug!(entries = dims.len(), "shaping power field");

        let n = dims.len() as f64;
        let base = self.rated_power_w / n;

        let mut total = 0.0;
        for (out, &t) in output.values_mut().iter_mut().zip(input.values()) {
            let damping = 1.0 - self.feedback_per_k * (t - self.reference_temperature_k);
            // Power density never goes negative, even for extreme fields.
            *out = (base * damping).max(0.0);
            total += *out;
        }

        if total <= 0.0 {
            return Err(KernelError::NonPhysical {
                what: "feedback drove total power to zero",
            });
        }

        // Rescale so the shaped field still delivers rated power.
        let scale = self.rated_power_w / total;
        for out in output.values_mut() {
            *out *= scale;
        }
        Ok(())
    }
}

/// Power density in, temperature out.
///
/// Lumped single-resistance map: each entry sits at the sink temperature
/// plus the local power density times a thermal resistance.
#[derive(Clone, Debug)]
pub struct LumpedConductionKernel {
    /// Coolant sink temperature (K).
    pub sink_temperature_k: f64,
    /// Thermal resistance (K per W/m3 of local deposition).
    pub resistance_k_per_w: f64,
}

impl LumpedConductionKernel {
    pub fn new(sink_temperature_k: f64, resistance_k_per_w: f64) -> KernelResult<Self> {
        if sink_temperature_k <= 0.0 {
            return Err(KernelError::InvalidArg {
                what: "sink temperature must be positive",
            });
        }
        if resistance_k_per_w < 0.0 {
            return Err(KernelError::InvalidArg {
                what: "thermal resistance must be non-negative",
            });
        }
        Ok(Self {
            sink_temperature_k,
            resistance_k_per_w,
        })
    }
}

impl PhysicsKernel for LumpedConductionKernel {
    fn name(&self) -> &str {
        "lumped-conduction"
    }

    fn solve(
        &mut self,
        dims: MeshDims,
        input: &ScalarField,
        output: &mut ScalarField,
    ) -> KernelResult<()> {
        check_sizes(dims, input, output)?;
        input.ensure_finite("power density field")?;
        debug!(entries = dims.len(), "mapping power to temperature");

        for (out, &q) in output.values_mut().iter_mut().zip(input.values()) {
            *out = self.sink_temperature_k + self.resistance_k_per_w * q;
        }
        Ok(())
    }
}
