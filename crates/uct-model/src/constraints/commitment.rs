//! Commitment state transition.

use good_lp::constraint;

use uct_core::{InitialState, Sets, UcData};

use crate::error::ModelError;
use crate::var::UcVars;
use crate::LabeledConstraints;

use super::iu;

/// `num_committed[i] = num_committed[i-1] + startups - shutdowns` for every
/// interior interval. The objective structure keeps startups and shutdowns
/// from both being positive at an optimum, so no explicit disjunction is
/// needed.
pub fn commitment_continuity(
    sets: &Sets,
    _data: &UcData,
    vars: &UcVars,
) -> Result<LabeledConstraints, ModelError> {
    let intervals: Vec<i64> = sets.intervals.intervals().collect();
    let mut out = Vec::new();
    for pair in intervals.windows(2) {
        let (prev, i) = (pair[0], pair[1]);
        for u in sets.units_commit.labels() {
            out.push((
                format!("commitment_continuity(i={i}, u={u})"),
                constraint!(
                    vars.num_committed.at(&iu(i, u))
                        == vars.num_committed.at(&iu(prev, u))
                            + vars.num_starting_up.at(&iu(i, u))
                            - vars.num_shutting_down.at(&iu(i, u))
                ),
            ));
        }
    }
    Ok(out)
}

/// The same transition at the first interval, seeded with the
/// `(num_committed, -1)` initial-state column (0 when absent).
pub fn commitment_continuity_initial_interval(
    sets: &Sets,
    data: &UcData,
    vars: &UcVars,
) -> Result<LabeledConstraints, ModelError> {
    let Some(i0) = sets.intervals.intervals().next() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for u in sets.units_commit.labels() {
        let initial_units_on = data
            .initial_state
            .value(u, InitialState::NUM_COMMITTED, -1);
        out.push((
            format!("commitment_continuity(i={i0}, u={u})"),
            constraint!(
                vars.num_committed.at(&iu(i0, u))
                    == initial_units_on + vars.num_starting_up.at(&iu(i0, u))
                        - vars.num_shutting_down.at(&iu(i0, u))
            ),
        ));
    }
    Ok(out)
}
