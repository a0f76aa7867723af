//! Ramp limits, linearized across startup and shutdown transitions.
//!
//! Machines that stay online may move by `R_online` per interval. A machine
//! starting up may jump to `max(ramp rate, min gen)`, since it cannot
//! appear below its stable minimum, and a machine shutting down gets the
//! mirror
//! allowance. The `MinGen` terms subtract the contribution of
//! just-transitioning machines that cannot be expected to ramp smoothly
//! across the transition. The first interval measures its delta against the
//! `(power_generated, -1)` initial-state column.

use good_lp::{constraint, Expression};

use uct_core::{InitialState, Sets, UcData, UnitRecord};

use crate::error::ModelError;
use crate::var::UcVars;
use crate::LabeledConstraints;

use super::iu;

/// Output change over the preceding interval, with the pre-horizon output
/// read from the initial state.
fn power_delta(data: &UcData, vars: &UcVars, i: i64, first_interval: i64, u: &str) -> Expression {
    let current = Expression::from(vars.power_generated.at(&iu(i, u)));
    if i == first_interval {
        let previous = data
            .initial_state
            .value(u, InitialState::POWER_GENERATED, -1);
        current - previous
    } else {
        current - vars.power_generated.at(&iu(i - 1, u))
    }
}

fn ramp_capacities(unit: &UnitRecord) -> (f64, f64, f64, f64) {
    (
        unit.ramp_online_mw(),
        unit.ramp_startup_mw(),
        unit.ramp_shutdown_mw(),
        unit.min_gen_mw(),
    )
}

pub fn ramp_rate_up(
    sets: &Sets,
    data: &UcData,
    vars: &UcVars,
) -> Result<LabeledConstraints, ModelError> {
    let Some(i0) = sets.intervals.intervals().next() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for i in sets.intervals.intervals() {
        for u in sets.units_commit.labels() {
            let (r_online, r_startup, _, min_gen) = ramp_capacities(data.fleet.unit(u));
            let delta = power_delta(data, vars, i, i0, u);

            // (committed - starting) * R_online + starting * R_startup
            //   - stopping * MinGen
            let mut allowance = Expression::from(0.0);
            allowance += r_online * vars.num_committed.at(&iu(i, u));
            allowance += (r_startup - r_online) * vars.num_starting_up.at(&iu(i, u));
            allowance -= min_gen * vars.num_shutting_down.at(&iu(i, u));

            out.push((
                format!("ramp_rate_up_(i={i}, u={u})"),
                constraint!(delta <= allowance),
            ));
        }
    }
    Ok(out)
}

pub fn ramp_rate_down(
    sets: &Sets,
    data: &UcData,
    vars: &UcVars,
) -> Result<LabeledConstraints, ModelError> {
    let Some(i0) = sets.intervals.intervals().next() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for i in sets.intervals.intervals() {
        for u in sets.units_commit.labels() {
            let (r_online, _, r_shutdown, min_gen) = ramp_capacities(data.fleet.unit(u));
            let delta = power_delta(data, vars, i, i0, u);

            // (committed - starting) * R_online + stopping * R_shutdown
            //   - starting * MinGen
            let mut allowance = Expression::from(0.0);
            allowance += r_online * vars.num_committed.at(&iu(i, u));
            allowance -= (r_online + min_gen) * vars.num_starting_up.at(&iu(i, u));
            allowance += r_shutdown * vars.num_shutting_down.at(&iu(i, u));

            out.push((
                format!("ramp_rate_down_(i={i}, u={u})"),
                constraint!(0.0 - delta <= allowance),
            ));
        }
    }
    Ok(out)
}
