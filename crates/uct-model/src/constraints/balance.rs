//! Supply balance and capacity envelopes.

use good_lp::{constraint, Expression};

use uct_core::{Sets, UcData};

use crate::error::ModelError;
use crate::var::UcVars;
use crate::LabeledConstraints;

use super::{ii, iu};

/// Supply equals demand at every interval. Storage charging appears on the
/// demand side grossed up by round-trip efficiency, so conversion losses
/// land in the balance rather than the energy equation; unserved power is
/// the slack priced at the value of lost load.
pub fn supply_eq_demand(
    sets: &Sets,
    data: &UcData,
    vars: &UcVars,
) -> Result<LabeledConstraints, ModelError> {
    let mut out = Vec::new();
    for (pos, i) in sets.intervals.intervals().enumerate() {
        let mut supply = Expression::from(vars.unserved_power.at(&ii(i)));
        for u in sets.units.labels() {
            supply += vars.power_generated.at(&iu(i, u));
        }

        let mut withdrawal = Expression::from(data.demand.at(pos));
        for s in sets.units_storage.labels() {
            let gross_up = 1.0 / data.fleet.unit(s).round_trip_efficiency_frac;
            withdrawal += gross_up * vars.power_charged.at(&iu(i, s));
        }

        out.push((
            format!("supply_eq_demand_(i={i})"),
            constraint!(supply == withdrawal),
        ));
    }
    Ok(out)
}

/// Output of every unit is capped by its whole fleet rating.
pub fn power_lt_capacity(
    sets: &Sets,
    data: &UcData,
    vars: &UcVars,
) -> Result<LabeledConstraints, ModelError> {
    let mut out = Vec::new();
    for i in sets.intervals.intervals() {
        for u in sets.units.labels() {
            let cap = data.fleet.unit(u).fleet_capacity_mw();
            out.push((
                format!("power_lt_capacity_(i={i}, u={u})"),
                constraint!(vars.power_generated.at(&iu(i, u)) <= cap),
            ));
        }
    }
    Ok(out)
}

/// Thermal output is capped by the capacity of the machines currently on.
pub fn power_lt_committed_capacity(
    sets: &Sets,
    data: &UcData,
    vars: &UcVars,
) -> Result<LabeledConstraints, ModelError> {
    let mut out = Vec::new();
    for i in sets.intervals.intervals() {
        for u in sets.units_commit.labels() {
            let capacity = data.fleet.unit(u).capacity_mw;
            out.push((
                format!("power_lt_committed_capacity_(i={i}, u={u})"),
                constraint!(
                    vars.power_generated.at(&iu(i, u))
                        <= capacity * vars.num_committed.at(&iu(i, u))
                ),
            ));
        }
    }
    Ok(out)
}

/// Committed machines must run at or above their stable minimum.
pub fn power_gt_minimum_generation(
    sets: &Sets,
    data: &UcData,
    vars: &UcVars,
) -> Result<LabeledConstraints, ModelError> {
    let mut out = Vec::new();
    for i in sets.intervals.intervals() {
        for u in sets.units_commit.labels() {
            let min_gen = data.fleet.unit(u).min_gen_mw();
            out.push((
                format!("power_gt_minimum_generation_(i={i}, u={u})"),
                constraint!(
                    vars.power_generated.at(&iu(i, u))
                        >= min_gen * vars.num_committed.at(&iu(i, u))
                ),
            ));
        }
    }
    Ok(out)
}

/// No more machines on than the fleet row bundles.
pub fn num_committed_lt_num_units(
    sets: &Sets,
    data: &UcData,
    vars: &UcVars,
) -> Result<LabeledConstraints, ModelError> {
    let mut out = Vec::new();
    for i in sets.intervals.intervals() {
        for u in sets.units_commit.labels() {
            let fleet_size = f64::from(data.fleet.unit(u).num_units);
            out.push((
                format!("num_committed_lt_num_units(i={i}, u={u})"),
                constraint!(vars.num_committed.at(&iu(i, u)) <= fleet_size),
            ));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::test_fixture::{labels, problem};

    #[test]
    fn balance_emits_one_row_per_interval() {
        let (sets, data, vars) = problem();
        let constraints = supply_eq_demand(&sets, &data, &vars).unwrap();
        assert_eq!(
            labels(&constraints),
            vec![
                "supply_eq_demand_(i=0)",
                "supply_eq_demand_(i=1)",
                "supply_eq_demand_(i=2)",
            ]
        );
    }

    #[test]
    fn capacity_spans_all_units_in_natural_order() {
        let (sets, data, vars) = problem();
        let constraints = power_lt_capacity(&sets, &data, &vars).unwrap();
        assert_eq!(constraints.len(), 9);
        assert_eq!(labels(&constraints)[0], "power_lt_capacity_(i=0, u=U1)");
        assert_eq!(labels(&constraints)[2], "power_lt_capacity_(i=0, u=B1)");
        assert_eq!(labels(&constraints)[8], "power_lt_capacity_(i=2, u=B1)");
    }

    #[test]
    fn committed_capacity_families_cover_the_commit_subset_only() {
        let (sets, data, vars) = problem();
        for family in [
            power_lt_committed_capacity,
            power_gt_minimum_generation,
            num_committed_lt_num_units,
        ] {
            let constraints = family(&sets, &data, &vars).unwrap();
            assert_eq!(constraints.len(), 3); // 3 intervals x 1 commit unit
            assert!(labels(&constraints).iter().all(|l| l.contains("u=U1")));
        }
    }
}
