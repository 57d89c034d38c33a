//! Transfer declarations and execution.

use rf_core::{FieldStore, ScalarField, TransferDirection};
use tracing::debug;

use crate::error::{TransferError, TransferResult};
use crate::gate::TransferGate;

/// How field data moves between differently meshed stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferKind {
    /// Whole-field copy; source and destination lengths must match.
    Copy,
    /// Linear resample in flat index space; lengths may differ.
    Interpolate,
}

/// Declaration of one directional parent/sub-application transfer.
#[derive(Clone, Debug)]
pub struct TransferSpec {
    /// Unique transfer name, used in logs and for lookups.
    pub name: String,
    /// Transfer group executed together by the control layer.
    pub group: String,
    pub direction: TransferDirection,
    /// Sub-application this transfer binds to.
    pub app: String,
    /// Field name in the parent store.
    pub parent_field: String,
    /// Field name in the sub-application store.
    pub app_field: String,
    pub kind: TransferKind,
}

/// A declared transfer paired with its control gate.
#[derive(Clone, Debug)]
pub struct FieldTransfer {
    spec: TransferSpec,
    gate: TransferGate,
}

impl FieldTransfer {
    pub fn new(spec: TransferSpec) -> Self {
        Self {
            spec,
            gate: TransferGate::default(),
        }
    }

    pub fn spec(&self) -> &TransferSpec {
        &self.spec
    }

    pub fn gate(&self) -> TransferGate {
        self.gate
    }

    pub fn set_active(&mut self, active: bool) {
        self.gate.set_active(active);
    }

    /// Execute the transfer between the parent store and one
    /// sub-application store.
    ///
    /// A closed gate makes this a silent no-op. The source and
    /// destination are chosen from the declared direction.
    pub fn execute(
        &mut self,
        parent: &mut FieldStore,
        sub: &mut FieldStore,
    ) -> TransferResult<()> {
        if !self.gate.is_active() {
            return Ok(());
        }

        debug!(
            name = %self.spec.name,
            direction = %self.spec.direction,
            "executing field transfer"
        );

        match self.spec.direction {
            TransferDirection::ToSubApp => {
                let source = parent.get(&self.spec.parent_field)?;
                let dest = sub.get_mut(&self.spec.app_field)?;
                self.move_field(source, dest)
            }
            TransferDirection::FromSubApp => {
                let source = sub.get(&self.spec.app_field)?;
                let dest = parent.get_mut(&self.spec.parent_field)?;
                self.move_field(source, dest)
            }
        }
    }

    fn move_field(&self, source: &ScalarField, dest: &mut ScalarField) -> TransferResult<()> {
        match self.spec.kind {
            TransferKind::Copy => {
                if source.len() != dest.len() {
                    return Err(TransferError::CopySizeMismatch {
                        name: self.spec.name.clone(),
                        source_len: source.len(),
                        dest_len: dest.len(),
                    });
                }
                dest.copy_from(source)?;
                Ok(())
            }
            TransferKind::Interpolate => {
                resample_linear(source.values(), dest.values_mut());
                Ok(())
            }
        }
    }
}

/// Linear resample of `source` onto `dest` in flat index space.
///
/// Endpoints map to endpoints; interior destination entries interpolate
/// between the two bracketing source entries.
fn resample_linear(source: &[f64], dest: &mut [f64]) {
    if source.is_empty() || dest.is_empty() {
        return;
    }
    if source.len() == 1 {
        dest.fill(source[0]);
        return;
    }
    if dest.len() == 1 {
        dest[0] = source[0];
        return;
    }

    let scale = (source.len() - 1) as f64 / (dest.len() - 1) as f64;
    for (i, out) in dest.iter_mut().enumerate() {
        let pos = i as f64 * scale;
        let lo = pos.floor() as usize;
        let hi = (lo + 1).min(source.len() - 1);
        let frac = pos - lo as f64;
        *out = source[lo] * (1.0 - frac) + source[hi] * frac;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_core::MeshDims;

    fn spec(kind: TransferKind, direction: TransferDirection) -> TransferSpec {
        TransferSpec {
            name: "power_pull".to_string(),
            group: "from_neutronics".to_string(),
            direction,
            app: "neutronics".to_string(),
            parent_field: "power".to_string(),
            app_field: "power".to_string(),
            kind,
        }
    }

    fn store_with(name: &str, values: Vec<f64>) -> FieldStore {
        let dims = MeshDims::new(values.len(), 1, 1).unwrap();
        let mut store = FieldStore::new();
        store.insert(name, ScalarField::from_vec(dims, values).unwrap());
        store
    }

    #[test]
    fn closed_gate_moves_nothing() {
        let mut transfer = FieldTransfer::new(spec(TransferKind::Copy, TransferDirection::FromSubApp));
        let mut parent = store_with("power", vec![0.0, 0.0]);
        let mut sub = store_with("power", vec![5.0, 7.0]);

        transfer.execute(&mut parent, &mut sub).unwrap();
        assert_eq!(parent.get("power").unwrap().values(), &[0.0, 0.0]);
    }

    #[test]
    fn open_gate_copies_from_sub() {
        let mut transfer = FieldTransfer::new(spec(TransferKind::Copy, TransferDirection::FromSubApp));
        transfer.set_active(true);
        let mut parent = store_with("power", vec![0.0, 0.0]);
        let mut sub = store_with("power", vec![5.0, 7.0]);

        transfer.execute(&mut parent, &mut sub).unwrap();
        assert_eq!(parent.get("power").unwrap().values(), &[5.0, 7.0]);
    }

    #[test]
    fn copy_size_mismatch_is_an_error() {
        let mut transfer = FieldTransfer::new(spec(TransferKind::Copy, TransferDirection::ToSubApp));
        transfer.set_active(true);
        let mut parent = store_with("power", vec![1.0, 2.0, 3.0]);
        let mut sub = store_with("power", vec![0.0, 0.0]);

        let err = transfer.execute(&mut parent, &mut sub).unwrap_err();
        assert!(matches!(err, TransferError::CopySizeMismatch { .. }));
    }

    #[test]
    fn interpolation_matches_endpoints() {
        let mut transfer =
            FieldTransfer::new(spec(TransferKind::Interpolate, TransferDirection::ToSubApp));
        transfer.set_active(true);
        let mut parent = store_with("power", vec![0.0, 10.0]);
        let mut sub = store_with("power", vec![0.0; 5]);

        transfer.execute(&mut parent, &mut sub).unwrap();
        let got = sub.get("power").unwrap().values().to_vec();
        assert_eq!(got.first().copied(), Some(0.0));
        assert_eq!(got.last().copied(), Some(10.0));
        assert!((got[2] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn resample_to_single_entry_takes_first() {
        let mut dest = [0.0];
        resample_linear(&[3.0, 4.0, 5.0], &mut dest);
        assert_eq!(dest[0], 3.0);
    }
}
