//! rf-kernel: external numerical kernel surface for reactorflow.
//!
//! The native transport and heat-deposition solvers consume flat arrays
//! keyed by mesh dimensions. This crate hides their calling convention
//! behind the [`PhysicsKernel`] trait and ships two built-in stand-in
//! kernels used by demos and tests. The real solver bindings live in the
//! `ffi` module behind the `extern-solver` feature.

pub mod error;
#[cfg(feature = "extern-solver")]
pub mod ffi;
pub mod kernel;
pub mod standin;

pub use error::{KernelError, KernelResult};
pub use kernel::PhysicsKernel;
pub use standin::{FeedbackPowerKernel, LumpedConductionKernel};
