//! Coupling configuration and calculation modes.

use core::fmt;

use crate::error::{CouplingError, CouplingResult};

/// Calculation mode for the burnup campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalcMode {
    /// Transport solves only; no thermal feedback.
    NeutronicsOnly = 1,
    /// Alternating neutronics/thermal fixed-point coupling.
    Coupled = 2,
}

impl CalcMode {
    /// Parse the externally supplied integer encoding (1 or 2).
    pub fn from_raw(raw: u32) -> CouplingResult<Self> {
        match raw {
            1 => Ok(CalcMode::NeutronicsOnly),
            2 => Ok(CalcMode::Coupled),
            _ => Err(CouplingError::UnknownCalcType { raw }),
        }
    }

    pub fn raw(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for CalcMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcMode::NeutronicsOnly => write!(f, "neutronics-only"),
            CalcMode::Coupled => write!(f, "coupled"),
        }
    }
}

/// Named transfer groups the scheduler sweeps at the start of each step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferGroups {
    pub to_neutronics: String,
    pub from_neutronics: String,
    pub to_thermal: String,
    pub from_thermal: String,
}

impl Default for TransferGroups {
    fn default() -> Self {
        Self {
            to_neutronics: "to_neutronics".to_string(),
            from_neutronics: "from_neutronics".to_string(),
            to_thermal: "to_thermal".to_string(),
            from_thermal: "from_thermal".to_string(),
        }
    }
}

/// Immutable scheduler configuration, created once at setup.
#[derive(Clone, Debug)]
pub struct CouplingConfig {
    pub calc_type: CalcMode,
    /// Initial burnup step index.
    pub burn_step: u32,
    pub max_burn_steps: u32,
    pub max_coupling_iterations: u32,
    /// Coupling convergence tolerance. Currently inert: the coupling loop
    /// never re-evaluates its field-change metric, so the early exit this
    /// tolerance guards can not fire (see `CoupledDriver`).
    pub coupling_tolerance: f64,
    pub fixed_point_min_its: u32,
    pub fixed_point_max_its: u32,
    pub fixed_point_tol: f64,
    /// Treat a loop that exhausts its iterations as an accepted solution.
    pub accept_on_max_iteration: bool,
    pub neutronics_app: String,
    pub thermal_app: String,
    pub transfer_groups: TransferGroups,
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self {
            calc_type: CalcMode::Coupled,
            burn_step: 1,
            max_burn_steps: 10,
            max_coupling_iterations: 5,
            coupling_tolerance: 1e-4,
            fixed_point_min_its: 1,
            fixed_point_max_its: 5,
            fixed_point_tol: 1e-6,
            accept_on_max_iteration: true,
            neutronics_app: "neutronics".to_string(),
            thermal_app: "thermal".to_string(),
            transfer_groups: TransferGroups::default(),
        }
    }
}

impl CouplingConfig {
    /// Check construction-time invariants. A violation here is fatal: the
    /// scheduler refuses to come up and no step ever executes.
    pub fn validate(&self) -> CouplingResult<()> {
        if self.burn_step > self.max_burn_steps {
            return Err(CouplingError::Config {
                what: format!(
                    "initial burnup step ({}) cannot exceed max burnup steps ({})",
                    self.burn_step, self.max_burn_steps
                ),
            });
        }
        if self.max_burn_steps == 0 {
            return Err(CouplingError::Config {
                what: "max burnup steps must be positive".to_string(),
            });
        }
        if self.max_coupling_iterations == 0 {
            return Err(CouplingError::Config {
                what: "max coupling iterations must be positive".to_string(),
            });
        }
        if !(self.coupling_tolerance > 0.0) || !self.coupling_tolerance.is_finite() {
            return Err(CouplingError::Config {
                what: "coupling tolerance must be a positive finite value".to_string(),
            });
        }
        if self.fixed_point_min_its > self.fixed_point_max_its {
            return Err(CouplingError::Config {
                what: format!(
                    "fixed point min iterations ({}) cannot exceed max iterations ({})",
                    self.fixed_point_min_its, self.fixed_point_max_its
                ),
            });
        }
        if !(self.fixed_point_tol > 0.0) || !self.fixed_point_tol.is_finite() {
            return Err(CouplingError::Config {
                what: "fixed point tolerance must be a positive finite value".to_string(),
            });
        }
        if self.neutronics_app.is_empty() || self.thermal_app.is_empty() {
            return Err(CouplingError::Config {
                what: "sub-application names must be non-empty".to_string(),
            });
        }
        Ok(())
    }
}
