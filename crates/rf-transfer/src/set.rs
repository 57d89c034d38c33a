//! Transfer collections grouped for control-layer execution.

use rf_core::TransferDirection;

use crate::error::{TransferError, TransferResult};
use crate::transfer::{FieldTransfer, TransferSpec};

/// All declared transfers for one simulation, addressed by group and
/// direction.
#[derive(Debug, Default)]
pub struct TransferSet {
    transfers: Vec<FieldTransfer>,
}

impl TransferSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a transfer. Names must be unique across the set.
    pub fn add(&mut self, spec: TransferSpec) -> TransferResult<()> {
        if self.transfers.iter().any(|t| t.spec().name == spec.name) {
            return Err(TransferError::DuplicateName { name: spec.name });
        }
        self.transfers.push(FieldTransfer::new(spec));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldTransfer> {
        self.transfers.iter()
    }

    /// Transfers belonging to `group` with the given direction.
    pub fn group_iter_mut(
        &mut self,
        group: &str,
        direction: TransferDirection,
    ) -> impl Iterator<Item = &mut FieldTransfer> {
        self.transfers
            .iter_mut()
            .filter(move |t| t.spec().group == group && t.spec().direction == direction)
    }

    /// Close every gate in the set.
    pub fn deactivate_all(&mut self) {
        for t in &mut self.transfers {
            t.set_active(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::TransferKind;

    fn spec(name: &str, group: &str, direction: TransferDirection) -> TransferSpec {
        TransferSpec {
            name: name.to_string(),
            group: group.to_string(),
            direction,
            app: "thermal".to_string(),
            parent_field: "power".to_string(),
            app_field: "power".to_string(),
            kind: TransferKind::Copy,
        }
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut set = TransferSet::new();
        set.add(spec("a", "to_thermal", TransferDirection::ToSubApp))
            .unwrap();
        let err = set
            .add(spec("a", "from_thermal", TransferDirection::FromSubApp))
            .unwrap_err();
        assert!(matches!(err, TransferError::DuplicateName { .. }));
    }

    #[test]
    fn group_filter_matches_group_and_direction() {
        let mut set = TransferSet::new();
        set.add(spec("a", "to_thermal", TransferDirection::ToSubApp))
            .unwrap();
        set.add(spec("b", "to_thermal", TransferDirection::FromSubApp))
            .unwrap();
        set.add(spec("c", "to_neutronics", TransferDirection::ToSubApp))
            .unwrap();

        let names: Vec<String> = set
            .group_iter_mut("to_thermal", TransferDirection::ToSubApp)
            .map(|t| t.spec().name.clone())
            .collect();
        assert_eq!(names, ["a"]);
    }

    #[test]
    fn deactivate_all_closes_every_gate() {
        let mut set = TransferSet::new();
        set.add(spec("a", "g", TransferDirection::ToSubApp)).unwrap();
        set.add(spec("b", "g", TransferDirection::ToSubApp)).unwrap();
        for t in set.group_iter_mut("g", TransferDirection::ToSubApp) {
            t.set_active(true);
        }
        set.deactivate_all();
        assert!(set.iter().all(|t| !t.gate().is_active()));
    }
}
