//! Objective terms: fuel, variable O&M and unserved energy.

use good_lp::Expression;

use uct_core::{Sets, UcData};

use crate::constraints::{ii, iu};
use crate::var::UcVars;

/// Fuel cost of the committable thermal fleet. Variable and storage units
/// carry no fuel; a future fueled technology outside `units_commit` needs
/// this term generalized.
pub fn fuel_cost_term(sets: &Sets, data: &UcData, vars: &UcVars) -> Expression {
    let dt = data.interval_duration_hrs;
    let mut term = Expression::from(0.0);
    for u in sets.units_commit.labels() {
        let cost = dt * data.fleet.unit(u).fuel_cost_per_mwh();
        for i in sets.intervals.intervals() {
            term += cost * vars.power_generated.at(&iu(i, u));
        }
    }
    term
}

/// Variable O&M across every unit.
pub fn vom_cost_term(sets: &Sets, data: &UcData, vars: &UcVars) -> Expression {
    let dt = data.interval_duration_hrs;
    let mut term = Expression::from(0.0);
    for u in sets.units.labels() {
        let cost = dt * data.fleet.unit(u).vom_per_mwh;
        for i in sets.intervals.intervals() {
            term += cost * vars.power_generated.at(&iu(i, u));
        }
    }
    term
}

/// Unserved energy priced at the value of lost load.
pub fn unserved_energy_cost_term(sets: &Sets, data: &UcData, vars: &UcVars) -> Expression {
    let dt = data.interval_duration_hrs;
    let cost = dt * data.value_of_lost_load_per_mwh;
    let mut term = Expression::from(0.0);
    for i in sets.intervals.intervals() {
        term += cost * vars.unserved_power.at(&ii(i));
    }
    term
}

/// The full minimization objective.
pub fn make_objective(sets: &Sets, data: &UcData, vars: &UcVars) -> Expression {
    fuel_cost_term(sets, data, vars)
        + vom_cost_term(sets, data, vars)
        + unserved_energy_cost_term(sets, data, vars)
}
