//! Storage charging, energy continuity and energy capacity.

use good_lp::{constraint, Expression};

use uct_core::{InitialState, Sets, UcData};

use crate::error::ModelError;
use crate::var::UcVars;
use crate::LabeledConstraints;

use super::iu;

/// AC-side withdrawal is capped by the fleet rating derated to round-trip
/// efficiency.
pub fn power_charged_lt_charge_capacity(
    sets: &Sets,
    data: &UcData,
    vars: &UcVars,
) -> Result<LabeledConstraints, ModelError> {
    let mut out = Vec::new();
    for i in sets.intervals.intervals() {
        for u in sets.units_storage.labels() {
            let unit = data.fleet.unit(u);
            let ceiling = unit.fleet_capacity_mw() * unit.round_trip_efficiency_frac;
            out.push((
                format!("power_charged_lt_charge_capacity_(i={i}, u={u})"),
                constraint!(vars.power_charged.at(&iu(i, u)) <= ceiling),
            ));
        }
    }
    Ok(out)
}

/// Energy bookkeeping between adjacent intervals: charging fills the store,
/// discharging empties it. Conversion losses are charged in the supply
/// balance, not here. The first interval continues from the
/// `(stored_energy, -1)` initial-state column.
pub fn stored_energy_continuity(
    sets: &Sets,
    data: &UcData,
    vars: &UcVars,
) -> Result<LabeledConstraints, ModelError> {
    let dt = data.interval_duration_hrs;
    let Some(i0) = sets.intervals.intervals().next() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for i in sets.intervals.intervals() {
        for u in sets.units_storage.labels() {
            let previous = if i == i0 {
                Expression::from(data.initial_state.value(u, InitialState::STORED_ENERGY, -1))
            } else {
                Expression::from(vars.stored_energy.at(&iu(i - 1, u)))
            };

            let mut ledger = previous;
            ledger -= vars.stored_energy.at(&iu(i, u));
            ledger += dt * vars.power_charged.at(&iu(i, u));
            ledger -= dt * vars.power_generated.at(&iu(i, u));

            out.push((
                format!("stored_energy_continuity_(i={i}, u={u})"),
                constraint!(ledger == 0.0),
            ));
        }
    }
    Ok(out)
}

/// Stored energy is capped by `NumUnits x CapacityMW x StorageHrs x dt`.
/// The interval-duration factor is the documented formulation: energy
/// headroom scales with the timestep on sub-hourly runs.
pub fn stored_energy_lt_storage_capacity(
    sets: &Sets,
    data: &UcData,
    vars: &UcVars,
) -> Result<LabeledConstraints, ModelError> {
    let dt = data.interval_duration_hrs;
    let mut out = Vec::new();
    for i in sets.intervals.intervals() {
        for u in sets.units_storage.labels() {
            let cap = data.fleet.unit(u).storage_capacity_mwh(dt);
            out.push((
                format!("stored_energy_lt_storage_capacity_(i={i}, u={u})"),
                constraint!(vars.stored_energy.at(&iu(i, u)) <= cap),
            ));
        }
    }
    Ok(out)
}
