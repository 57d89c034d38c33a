//! Temperature-convergence monitoring between coupling iterations.

use nalgebra::DVector;
use rf_core::ScalarField;
use tracing::debug;

/// Relative change of the temperature field between the two most recent
/// coupling iterations.
///
/// Reports the sentinel value 1.0 until two fields of matching size have
/// been seen, so a freshly reset monitor always reads "not converged".
///
/// The coupling loop does not currently consult this monitor (its
/// tolerance test runs against an unevaluated metric); the runtime still
/// feeds it after every thermal solve so the history is available to
/// observers and to a future convergence wiring.
#[derive(Clone, Debug, Default)]
pub struct TemperatureConvergence {
    previous: Option<DVector<f64>>,
    current: Option<DVector<f64>>,
}

impl TemperatureConvergence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the temperature field produced by the latest iteration.
    pub fn update(&mut self, field: &ScalarField) {
        self.previous = self.current.take();
        self.current = Some(DVector::from_column_slice(field.values()));
    }

    /// Relative L2 change between the last two recorded fields, or the
    /// 1.0 sentinel when fewer than two comparable fields exist.
    pub fn relative_change(&self) -> f64 {
        let (Some(previous), Some(current)) = (&self.previous, &self.current) else {
            return 1.0;
        };
        if previous.len() != current.len() {
            // Shape changed under us; force "not converged".
            return 1.0;
        }
        let base = previous.norm();
        if base == 0.0 {
            return 1.0;
        }
        (current - previous).norm() / base
    }

    /// True once two comparable fields have been recorded.
    pub fn is_primed(&self) -> bool {
        matches!((&self.previous, &self.current), (Some(p), Some(c)) if p.len() == c.len())
    }

    /// Forget all recorded fields, returning to the sentinel state.
    pub fn reset(&mut self) {
        debug!("temperature convergence monitor reset");
        self.previous = None;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_core::MeshDims;

    fn field(values: Vec<f64>) -> ScalarField {
        let dims = MeshDims::new(values.len(), 1, 1).unwrap();
        ScalarField::from_vec(dims, values).unwrap()
    }

    #[test]
    fn sentinel_before_two_fields() {
        let mut monitor = TemperatureConvergence::new();
        assert_eq!(monitor.relative_change(), 1.0);
        monitor.update(&field(vec![500.0, 600.0]));
        assert_eq!(monitor.relative_change(), 1.0);
        assert!(!monitor.is_primed());
    }

    #[test]
    fn relative_change_of_identical_fields_is_zero() {
        let mut monitor = TemperatureConvergence::new();
        monitor.update(&field(vec![500.0, 600.0]));
        monitor.update(&field(vec![500.0, 600.0]));
        assert!(monitor.is_primed());
        assert_eq!(monitor.relative_change(), 0.0);
    }

    #[test]
    fn relative_change_scales_with_perturbation() {
        let mut monitor = TemperatureConvergence::new();
        monitor.update(&field(vec![100.0, 0.0]));
        monitor.update(&field(vec![101.0, 0.0]));
        assert!((monitor.relative_change() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn reset_restores_sentinel() {
        let mut monitor = TemperatureConvergence::new();
        monitor.update(&field(vec![1.0]));
        monitor.update(&field(vec![2.0]));
        monitor.reset();
        assert_eq!(monitor.relative_change(), 1.0);
    }

    #[test]
    fn shape_change_reads_not_converged() {
        let mut monitor = TemperatureConvergence::new();
        monitor.update(&field(vec![1.0, 2.0]));
        monitor.update(&field(vec![1.0, 2.0, 3.0]));
        assert_eq!(monitor.relative_change(), 1.0);
    }
}
