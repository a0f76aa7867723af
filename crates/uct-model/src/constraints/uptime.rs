//! Minimum up and down times.
//!
//! Every machine started within the last `MinimumUpTimeHrs` intervals must
//! still be on, and symmetrically for shutdowns. The lookback window spans
//! decision variables for modeled intervals and the initial-state table for
//! the pre-horizon past, so feasibility carries across rolling-horizon day
//! boundaries.

use good_lp::{constraint, Expression};

use uct_core::{InitialState, Sets, UcData};

use crate::error::ModelError;
use crate::var::{UcVars, Var};
use crate::LabeledConstraints;

use super::iu;

/// Startups within the up-time window, split into in-horizon variables and
/// a pre-horizon constant.
fn window_events(
    events: &Var,
    state_column: &str,
    data: &UcData,
    first_interval: i64,
    i: i64,
    width: i64,
    u: &str,
) -> (Expression, f64) {
    let mut in_horizon = Expression::from(0.0);
    let mut before_horizon = 0.0;
    for i2 in (i - width + 1)..=i {
        if i2 >= first_interval {
            in_horizon += events.at(&iu(i2, u));
        } else {
            before_horizon += data
                .initial_state
                .value(u, state_column, i2 - first_interval);
        }
    }
    (in_horizon, before_horizon)
}

pub fn minimum_up_time(
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
            let up_time = data.fleet.unit(u).up_time_intervals();
            let (started, started_before) = window_events(
                &vars.num_starting_up,
                InitialState::NUM_STARTING_UP,
                data,
                i0,
                i,
                up_time,
                u,
            );
            out.push((
                format!("minimum_up_time(i={i}, u={u})"),
                constraint!(vars.num_committed.at(&iu(i, u)) >= started + started_before),
            ));
        }
    }
    Ok(out)
}

pub fn minimum_down_time(
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
            let unit = data.fleet.unit(u);
            let down_time = unit.down_time_intervals();
            let fleet_size = f64::from(unit.num_units);
            let (stopped, stopped_before) = window_events(
                &vars.num_shutting_down,
                InitialState::NUM_SHUTTING_DOWN,
                data,
                i0,
                i,
                down_time,
                u,
            );
            // NumUnits - committed >= shutdowns within the window
            out.push((
                format!("minimum_down_time(i={i}, u={u})"),
                constraint!(
                    vars.num_committed.at(&iu(i, u)) + stopped + stopped_before <= fleet_size
                ),
            ));
        }
    }
    Ok(out)
}
