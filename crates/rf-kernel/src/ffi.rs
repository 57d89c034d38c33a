//! Raw bindings to the external native transport solver.
//!
//! Only compiled with the `extern-solver` feature; the embedding build
//! must provide the foreign symbols at link time. The rest of the
//! workspace never talks to these directly — it goes through
//! [`PhysicsKernel`] and the step-notification wrapper below.

use std::os::raw::c_int;

use rf_core::{MeshDims, ScalarField};

use crate::error::{KernelError, KernelResult};
use crate::kernel::PhysicsKernel;

extern "C" {
    /// Push the current and maximum burnup step indices into the solver.
    fn update_burnup_step(step: c_int, max_steps: c_int);

    /// Transport solve: temperature in, power density out, both sized
    /// `field_size = nx * ny * nz`.
    fn b1_execute(
        mesh_dims: *const c_int,
        temperature_field: *const f64,
        power_field: *mut f64,
        field_size: *const c_int,
    );
}

/// Fire-and-forget burnup step notification (no return value; the solver
/// is assumed to accept it).
pub fn notify_burnup_step(step: u32, max_steps: u32) {
    let step = step as c_int;
    let max_steps = max_steps as c_int;
    unsafe { update_burnup_step(step, max_steps) };
}

/// Transport solve over the external solver's `b1` entry point.
pub struct ExternSolverKernel;

impl PhysicsKernel for ExternSolverKernel {
    fn name(&self) -> &str {
        "extern-b1"
    }

    fn solve(
        &mut self,
        dims: MeshDims,
        input: &ScalarField,
        output: &mut ScalarField,
    ) -> KernelResult<()> {
        if input.len() != dims.len() || output.len() != dims.len() {
            return Err(KernelError::SizeMismatch {
                expected: dims.len(),
                got: input.len().min(output.len()),
            });
        }
        let mesh = [dims.nx as c_int, dims.ny as c_int, dims.nz as c_int];
        let field_size = dims.len() as c_int;
        unsafe {
            b1_execute(
                mesh.as_ptr(),
                input.values().as_ptr(),
                output.values_mut().as_mut_ptr(),
                &field_size,
            );
        }
        output.ensure_finite("extern solver power field")?;
        Ok(())
    }
}
