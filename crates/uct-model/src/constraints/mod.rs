//! The constraint library.
//!
//! Each family is a pure function of `(sets, data, vars)` producing an
//! ordered list of labeled linear (in)equalities. Labels literally encode
//! the index tuple (`power_lt_capacity_(i=3, u=Coal)`) and double as the
//! solver-side constraint identity; within a family the order is the
//! natural `(interval, unit)` order of the sets.
//!
//! Initial-state handling: wherever a constraint references the past
//! (continuity at the first interval, up/down-time lookbacks, the first
//! ramp, storage continuity at the first interval) the negative relative
//! interval is read straight from the initial-state table, with missing
//! cells treated as 0. No ghost intervals are ever allocated.

mod balance;
mod commitment;
mod ramp;
mod storage;
mod uptime;
mod variable;

pub use balance::{
    num_committed_lt_num_units, power_gt_minimum_generation, power_lt_capacity,
    power_lt_committed_capacity, supply_eq_demand,
};
pub use commitment::{commitment_continuity, commitment_continuity_initial_interval};
pub use ramp::{ramp_rate_down, ramp_rate_up};
pub use storage::{
    power_charged_lt_charge_capacity, stored_energy_continuity,
    stored_energy_lt_storage_capacity,
};
pub use uptime::{minimum_down_time, minimum_up_time};
pub use variable::variable_resource_availability;

use uct_core::Element;

/// `(interval, unit)` key for two-dimensional variables.
pub(crate) fn iu(i: i64, u: &str) -> [Element; 2] {
    [Element::interval(i), Element::label(u)]
}

/// Interval-only key for one-dimensional variables.
pub(crate) fn ii(i: i64) -> [Element; 1] {
    [Element::interval(i)]
}
