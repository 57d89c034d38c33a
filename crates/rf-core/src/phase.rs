//! Execution phase tags and transfer directions.
//!
//! Phase tags are the named execution triggers used to select which
//! sub-applications run during a scheduler call. The set mirrors the
//! custom execution flags of the reactor coupling workflow: plain
//! neutronics, a pre-burnup preprocessing pass, burnup-corrected
//! neutronics, and the thermal solve.

use core::fmt;

/// Named execution trigger for sub-application dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PhaseTag {
    /// Plain neutronics solve.
    Neutronics,
    /// Pre-burnup preprocessing pass (input refresh, no transport solve).
    PreNeutronics,
    /// Neutronics solve with burnup-corrected fuel composition.
    CorrectedNeutronics,
    /// Thermal-hydraulics solve.
    Thermal,
}

impl PhaseTag {
    /// All tags, in dispatch-priority order.
    pub const ALL: [PhaseTag; 4] = [
        PhaseTag::Neutronics,
        PhaseTag::PreNeutronics,
        PhaseTag::CorrectedNeutronics,
        PhaseTag::Thermal,
    ];
}

impl fmt::Display for PhaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhaseTag::Neutronics => "NEUTRONICS",
            PhaseTag::PreNeutronics => "PRE_NEUTRONICS",
            PhaseTag::CorrectedNeutronics => "CORRECTED_NEUTRONICS",
            PhaseTag::Thermal => "THERMAL",
        };
        write!(f, "{name}")
    }
}

/// Direction of a parent/sub-application field transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransferDirection {
    /// Parent field pushed into a sub-application field.
    ToSubApp,
    /// Sub-application field pulled back into a parent field.
    FromSubApp,
}

impl fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransferDirection::ToSubApp => "TO_SUBAPP",
            TransferDirection::FromSubApp => "FROM_SUBAPP",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_tags_are_distinct() {
        for (i, a) in PhaseTag::ALL.iter().enumerate() {
            for b in PhaseTag::ALL.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(PhaseTag::CorrectedNeutronics.to_string(), "CORRECTED_NEUTRONICS");
        assert_eq!(TransferDirection::ToSubApp.to_string(), "TO_SUBAPP");
    }
}
