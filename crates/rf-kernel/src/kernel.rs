//! PhysicsKernel trait for pluggable numerical backends.

use rf_core::{MeshDims, ScalarField};

use crate::error::KernelResult;

/// Strategy interface over an opaque compute function taking flat arrays
/// and mesh dimensions.
///
/// A kernel maps one input field to one output field on the same mesh:
/// the neutronics kernel takes a temperature field and produces a power
/// density field, the heat-deposition kernel takes power density and
/// produces temperature. Callers never see how the backend is invoked.
///
/// Implementations must:
/// - leave `output` sized for `dims` (the caller allocates it),
/// - return finite values on success,
/// - report backend faults through [`crate::KernelError`], never panic.
pub trait PhysicsKernel {
    /// Human-readable backend name for status reporting.
    fn name(&self) -> &str;

    /// Run one solve over the mesh.
    fn solve(
        &mut self,
        dims: MeshDims,
        input: &ScalarField,
        output: &mut ScalarField,
    ) -> KernelResult<()>;
}
