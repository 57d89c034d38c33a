//! rf-physics: sub-applications coordinated by the coupling scheduler.
//!
//! A sub-application is an independently solved physics model with its
//! own local fields, registered for the phase tags it responds to. The
//! [`AppRegistry`] dispatches phase executions to registered apps, with
//! optional name filtering, and reports solve failure if any of them
//! fails.

pub mod error;
pub mod neutronics_app;
pub mod registry;
pub mod subapp;
pub mod thermal_app;

pub use error::{PhysicsError, PhysicsResult};
pub use neutronics_app::NeutronicsApp;
pub use registry::AppRegistry;
pub use subapp::SubApp;
pub use thermal_app::ThermalApp;
