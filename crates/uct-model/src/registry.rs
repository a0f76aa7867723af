//! Registry mapping constraint IDs to their builders.
//!
//! The built-in set of IDs is fixed; which families actually get
//! materialized is configuration, read from `constraint_list.csv`. This
//! keeps formulation and experiment setup apart: ramp limits can be
//! relaxed for a feasibility probe without touching code.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use uct_core::{ConstraintToggle, Sets, UcData};

use crate::constraints;
use crate::error::ModelError;
use crate::var::UcVars;
use crate::LabeledConstraints;

/// A constraint family builder.
pub type ConstraintBuilder =
    fn(&Sets, &UcData, &UcVars) -> Result<LabeledConstraints, ModelError>;

/// The closed set of constraint family IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintId {
    SupplyEqDemand,
    PowerLtCapacity,
    PowerLtCommittedCapacity,
    PowerGtMinimumGeneration,
    NumCommittedLtNumUnits,
    CommitmentContinuity,
    CommitmentContinuityInitialInterval,
    VariableResourceAvailability,
    MinimumUpTime,
    MinimumDownTime,
    RampRateUp,
    RampRateDown,
    PowerChargedLtChargeCapacity,
    StorageEnergyContinuity,
    StoredEnergyLtStorageCapacity,
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            ConstraintId::SupplyEqDemand => "Supply==Demand",
            ConstraintId::PowerLtCapacity => "Power<=Capacity",
            ConstraintId::PowerLtCommittedCapacity => "Power<=CommittedCapacity",
            ConstraintId::PowerGtMinimumGeneration => "Power>=MinimumGeneration",
            ConstraintId::NumCommittedLtNumUnits => "NumCommitted<=NumUnits",
            ConstraintId::CommitmentContinuity => "CommitmentContinuity",
            ConstraintId::CommitmentContinuityInitialInterval => {
                "CommitmentContinuityInitialInterval"
            }
            ConstraintId::VariableResourceAvailability => "VariablePower<=ResourceAvailability",
            ConstraintId::MinimumUpTime => "MinimumUpTime",
            ConstraintId::MinimumDownTime => "MinimumDownTime",
            ConstraintId::RampRateUp => "RampRateUp",
            ConstraintId::RampRateDown => "RampRateDown",
            ConstraintId::PowerChargedLtChargeCapacity => "PowerCharged<=ChargeCapacity",
            ConstraintId::StorageEnergyContinuity => "StorageEnergyContinuity",
            ConstraintId::StoredEnergyLtStorageCapacity => "StoredEnergy<=StorageCapacity",
        };
        write!(f, "{id}")
    }
}

impl FromStr for ConstraintId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Supply==Demand" => ConstraintId::SupplyEqDemand,
            "Power<=Capacity" => ConstraintId::PowerLtCapacity,
            "Power<=CommittedCapacity" => ConstraintId::PowerLtCommittedCapacity,
            "Power>=MinimumGeneration" => ConstraintId::PowerGtMinimumGeneration,
            "NumCommitted<=NumUnits" => ConstraintId::NumCommittedLtNumUnits,
            "CommitmentContinuity" => ConstraintId::CommitmentContinuity,
            "CommitmentContinuityInitialInterval" => {
                ConstraintId::CommitmentContinuityInitialInterval
            }
            "VariablePower<=ResourceAvailability" => ConstraintId::VariableResourceAvailability,
            "MinimumUpTime" => ConstraintId::MinimumUpTime,
            "MinimumDownTime" => ConstraintId::MinimumDownTime,
            "RampRateUp" => ConstraintId::RampRateUp,
            "RampRateDown" => ConstraintId::RampRateDown,
            "PowerCharged<=ChargeCapacity" => ConstraintId::PowerChargedLtChargeCapacity,
            "StorageEnergyContinuity" => ConstraintId::StorageEnergyContinuity,
            "StoredEnergy<=StorageCapacity" => ConstraintId::StoredEnergyLtStorageCapacity,
            other => {
                return Err(ModelError::UnknownConstraintId {
                    id: other.to_string(),
                })
            }
        })
    }
}

/// Holds the built-in families in registration order.
pub struct ConstraintRegistry {
    entries: Vec<(ConstraintId, ConstraintBuilder)>,
}

impl ConstraintRegistry {
    /// The full built-in registry. Registration order is attachment order.
    pub fn builtin() -> Self {
        let entries: Vec<(ConstraintId, ConstraintBuilder)> = vec![
            (ConstraintId::SupplyEqDemand, constraints::supply_eq_demand),
            (ConstraintId::PowerLtCapacity, constraints::power_lt_capacity),
            (
                ConstraintId::PowerLtCommittedCapacity,
                constraints::power_lt_committed_capacity,
            ),
            (
                ConstraintId::PowerGtMinimumGeneration,
                constraints::power_gt_minimum_generation,
            ),
            (
                ConstraintId::NumCommittedLtNumUnits,
                constraints::num_committed_lt_num_units,
            ),
            (
                ConstraintId::CommitmentContinuity,
                constraints::commitment_continuity,
            ),
            (
                ConstraintId::CommitmentContinuityInitialInterval,
                constraints::commitment_continuity_initial_interval,
            ),
            (
                ConstraintId::VariableResourceAvailability,
                constraints::variable_resource_availability,
            ),
            (ConstraintId::MinimumUpTime, constraints::minimum_up_time),
            (ConstraintId::MinimumDownTime, constraints::minimum_down_time),
            (ConstraintId::RampRateUp, constraints::ramp_rate_up),
            (ConstraintId::RampRateDown, constraints::ramp_rate_down),
            (
                ConstraintId::PowerChargedLtChargeCapacity,
                constraints::power_charged_lt_charge_capacity,
            ),
            (
                ConstraintId::StorageEnergyContinuity,
                constraints::stored_energy_continuity,
            ),
            (
                ConstraintId::StoredEnergyLtStorageCapacity,
                constraints::stored_energy_lt_storage_capacity,
            ),
        ];
        Self { entries }
    }

    pub fn ids(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Filter the registry through the toggle list. Families not mentioned
    /// in the list stay excluded; unknown IDs are a configuration error.
    pub fn select(
        &self,
        toggles: &[ConstraintToggle],
    ) -> Result<Vec<(ConstraintId, ConstraintBuilder)>, ModelError> {
        let mut included = Vec::new();
        for toggle in toggles {
            let id: ConstraintId = toggle.id.parse()?;
            if toggle.include {
                included.push(id);
            }
        }

        Ok(self
            .entries
            .iter()
            .filter(|(id, _)| included.contains(id))
            .copied()
            .collect())
    }

    /// Build every selected family, concatenated in registry order.
    pub fn build(
        selected: &[(ConstraintId, ConstraintBuilder)],
        sets: &Sets,
        data: &UcData,
        vars: &UcVars,
    ) -> Result<LabeledConstraints, ModelError> {
        let mut all = Vec::new();
        for (id, builder) in selected {
            let family = builder(sets, data, vars)?;
            debug!(id = %id, rows = family.len(), "built constraint family");
            all.extend(family);
        }
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::test_fixture::problem;

    fn toggle(id: &str, include: bool) -> ConstraintToggle {
        ConstraintToggle {
            id: id.to_string(),
            include,
        }
    }

    #[test]
    fn ids_round_trip_through_display() {
        for id in ConstraintRegistry::builtin().ids() {
            let parsed: ConstraintId = id.to_string().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn unknown_id_is_a_configuration_error() {
        let registry = ConstraintRegistry::builtin();
        let err = registry
            .select(&[toggle("Voltage<=Limit", true)])
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownConstraintId { .. }));
    }

    #[test]
    fn selection_follows_registry_order_not_toggle_order() {
        let registry = ConstraintRegistry::builtin();
        let selected = registry
            .select(&[
                toggle("RampRateUp", true),
                toggle("Supply==Demand", true),
                toggle("MinimumUpTime", false),
            ])
            .unwrap();
        let ids: Vec<ConstraintId> = selected.iter().map(|(id, _)| *id).collect();
        assert_eq!(
            ids,
            vec![ConstraintId::SupplyEqDemand, ConstraintId::RampRateUp]
        );
    }

    #[test]
    fn toggling_changes_exactly_the_selected_families() {
        let (sets, data, vars) = problem();
        let registry = ConstraintRegistry::builtin();

        let narrow = registry.select(&[toggle("Supply==Demand", true)]).unwrap();
        let wide = registry
            .select(&[
                toggle("Supply==Demand", true),
                toggle("Power<=Capacity", true),
            ])
            .unwrap();

        let narrow_rows = ConstraintRegistry::build(&narrow, &sets, &data, &vars).unwrap();
        let wide_rows = ConstraintRegistry::build(&wide, &sets, &data, &vars).unwrap();

        assert_eq!(narrow_rows.len(), 3);
        assert_eq!(wide_rows.len(), 3 + 9);
        // the balance family is bit-identical either way
        for ((a, _), (b, _)) in narrow_rows.iter().zip(wide_rows.iter()) {
            assert_eq!(a, b);
        }
    }
}
