//! rf-coupling: burnup-step coupling scheduler for reactorflow.
//!
//! Drives the burnup-step loop of a depletion calculation and, within
//! each step, the neutronics/thermal fixed-point coupling loop. The
//! scheduler owns nothing but control state: physics execution, field
//! transfers, and the external solver notification are reached through
//! the collaborator traits in [`runner`], so the whole control flow can
//! be exercised against mocks.
//!
//! Provides:
//! - coupling configuration with construction-time validation
//! - the three-branch burnup step state machine (init / first /
//!   subsequent) with per-mode dispatch
//! - the fixed-point coupling loop and its outcome taxonomy
//! - temperature-convergence monitoring scaffolding

pub mod config;
pub mod convergence;
pub mod coupled;
pub mod error;
pub mod neutronics;
pub mod runner;
pub mod scheduler;

pub use config::{CalcMode, CouplingConfig, TransferGroups};
pub use convergence::TemperatureConvergence;
pub use coupled::CoupledDriver;
pub use error::{CouplingError, CouplingResult};
pub use neutronics::NeutronicsDriver;
pub use runner::{
    Collaborators, LoggingStepNotifier, NullStepNotifier, PhysicsRunner, StepNotifier,
    TransferRunner,
};
pub use scheduler::{BurnupScheduler, StepOutcome};
