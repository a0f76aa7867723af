//! Fleet catalog, trace tables and the initial-state boundary table.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Megawatt-hours of thermal energy per gigajoule.
const GJ_PER_MWH: f64 = 3.6;

/// Technology classes recognized by the formulation.
///
/// The class decides subset membership: thermal technologies carry binary
/// commitment counts, wind and solar are bounded by an availability trace,
/// and storage tracks an energy state. Unlisted technologies still join the
/// `units` set but no subset, so only the fleet-capacity and balance
/// constraints apply to them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technology {
    Coal,
    Ccgt,
    Ocgt,
    Nuclear,
    Wind,
    Solar,
    Storage,
    Other(String),
}

impl Technology {
    /// Thermal units with on/off commitment decisions.
    pub fn is_commit(&self) -> bool {
        matches!(
            self,
            Technology::Coal | Technology::Ccgt | Technology::Ocgt | Technology::Nuclear
        )
    }

    /// Units bounded by a per-technology availability trace.
    pub fn is_variable(&self) -> bool {
        matches!(self, Technology::Wind | Technology::Solar)
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Technology::Storage)
    }

    /// Reserve-eligible classes: storage plus committable thermal.
    pub fn is_reserve_eligible(&self) -> bool {
        self.is_storage() || self.is_commit()
    }
}

impl FromStr for Technology {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Coal" => Technology::Coal,
            "CCGT" => Technology::Ccgt,
            "OCGT" => Technology::Ocgt,
            "Nuclear" => Technology::Nuclear,
            "Wind" => Technology::Wind,
            "Solar" => Technology::Solar,
            "Storage" => Technology::Storage,
            other => Technology::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Technology::Coal => write!(f, "Coal"),
            Technology::Ccgt => write!(f, "CCGT"),
            Technology::Ocgt => write!(f, "OCGT"),
            Technology::Nuclear => write!(f, "Nuclear"),
            Technology::Wind => write!(f, "Wind"),
            Technology::Solar => write!(f, "Solar"),
            Technology::Storage => write!(f, "Storage"),
            Technology::Other(name) => write!(f, "{name}"),
        }
    }
}

/// One fleet row of the unit catalog.
///
/// `num_units` bundles identical machines into a single entry; capacities
/// and commitment counts scale with it. Missing catalog cells load as 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitRecord {
    pub name: String,
    pub technology: Technology,
    pub capacity_mw: f64,
    pub num_units: u32,
    pub fuel_cost_per_gj: f64,
    pub thermal_efficiency_frac: f64,
    pub vom_per_mwh: f64,
    pub minimum_generation_frac: f64,
    pub minimum_up_time_hrs: f64,
    pub minimum_down_time_hrs: f64,
    pub ramp_rate_frac_cap_per_hr: f64,
    pub storage_hrs: f64,
    pub round_trip_efficiency_frac: f64,
}

impl UnitRecord {
    /// Rated output of the whole fleet row in MW.
    pub fn fleet_capacity_mw(&self) -> f64 {
        self.capacity_mw * f64::from(self.num_units)
    }

    /// Minimum stable generation of a single committed machine in MW.
    pub fn min_gen_mw(&self) -> f64 {
        self.minimum_generation_frac * self.capacity_mw
    }

    /// Fuel cost in $/MWh-electric: 3.6 converts $/GJ to $/MWh-thermal,
    /// thermal efficiency converts to the electric side.
    pub fn fuel_cost_per_mwh(&self) -> f64 {
        GJ_PER_MWH * self.fuel_cost_per_gj / self.thermal_efficiency_frac
    }

    /// Ramping capacity of one online machine in MW per interval.
    pub fn ramp_online_mw(&self) -> f64 {
        self.ramp_rate_frac_cap_per_hr * self.capacity_mw
    }

    /// Ramping capacity granted to a machine in its startup interval.
    pub fn ramp_startup_mw(&self) -> f64 {
        self.ramp_rate_frac_cap_per_hr.max(self.minimum_generation_frac) * self.capacity_mw
    }

    /// Ramping capacity granted to a machine in its shutdown interval.
    ///
    /// Currently the same formula as startup; kept separate so the two can
    /// diverge without touching the constraint algebra.
    pub fn ramp_shutdown_mw(&self) -> f64 {
        self.ramp_startup_mw()
    }

    /// Minimum up time as a whole number of lookback intervals.
    pub fn up_time_intervals(&self) -> i64 {
        self.minimum_up_time_hrs.round() as i64
    }

    /// Minimum down time as a whole number of lookback intervals.
    pub fn down_time_intervals(&self) -> i64 {
        self.minimum_down_time_hrs.round() as i64
    }

    /// Energy capacity of the fleet row in MWh, scaled by the interval
    /// duration. The duration factor is the documented formulation: energy
    /// headroom shrinks for sub-hourly runs.
    pub fn storage_capacity_mwh(&self, interval_duration_hrs: f64) -> f64 {
        self.fleet_capacity_mw() * self.storage_hrs * interval_duration_hrs
    }
}

/// The unit catalog, ordered as loaded.
#[derive(Debug, Clone, Default)]
pub struct FleetData {
    units: IndexMap<String, UnitRecord>,
}

impl FleetData {
    pub fn new(records: impl IntoIterator<Item = UnitRecord>) -> Self {
        Self {
            units: records.into_iter().map(|r| (r.name.clone(), r)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&UnitRecord> {
        self.units.get(name)
    }

    /// Catalog row for a unit known to exist (constraint builders index
    /// only over set members).
    pub fn unit(&self, name: &str) -> &UnitRecord {
        self.units
            .get(name)
            .expect("unit listed in a set is missing from the catalog")
    }

    pub fn unit_names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &UnitRecord> {
        self.units.values()
    }

    fn filter_class(&self, pred: impl Fn(&Technology) -> bool) -> Vec<&str> {
        self.units
            .values()
            .filter(|r| pred(&r.technology))
            .map(|r| r.name.as_str())
            .collect()
    }

    pub fn commit_units(&self) -> Vec<&str> {
        self.filter_class(Technology::is_commit)
    }

    pub fn variable_units(&self) -> Vec<&str> {
        self.filter_class(Technology::is_variable)
    }

    pub fn storage_units(&self) -> Vec<&str> {
        self.filter_class(Technology::is_storage)
    }

    pub fn reserve_units(&self) -> Vec<&str> {
        self.filter_class(Technology::is_reserve_eligible)
    }
}

/// The demand trace in MW, indexed by interval.
#[derive(Debug, Clone)]
pub struct DemandTrace {
    intervals: Vec<i64>,
    megawatts: Vec<f64>,
}

impl DemandTrace {
    pub fn new(intervals: Vec<i64>, megawatts: Vec<f64>) -> Self {
        debug_assert_eq!(intervals.len(), megawatts.len());
        Self {
            intervals,
            megawatts,
        }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn intervals(&self) -> impl Iterator<Item = i64> + '_ {
        self.intervals.iter().copied()
    }

    pub fn megawatts(&self) -> &[f64] {
        &self.megawatts
    }

    /// Demand at the `pos`-th interval of the horizon.
    pub fn at(&self, pos: usize) -> f64 {
        self.megawatts[pos]
    }

    /// A window of the trace re-indexed from interval 0, for per-day solves.
    pub fn window(&self, start: usize, len: usize) -> DemandTrace {
        DemandTrace {
            intervals: (0..len as i64).collect(),
            megawatts: self.megawatts[start..start + len].to_vec(),
        }
    }
}

/// Per-technology availability traces in [0, 1], indexed by interval.
#[derive(Debug, Clone)]
pub struct VariableTraces {
    intervals: Vec<i64>,
    columns: IndexMap<String, Vec<f64>>,
}

impl VariableTraces {
    pub fn new(intervals: Vec<i64>, columns: IndexMap<String, Vec<f64>>) -> Self {
        Self { intervals, columns }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn intervals(&self) -> impl Iterator<Item = i64> + '_ {
        self.intervals.iter().copied()
    }

    pub fn technologies(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn series(&self, technology: &str) -> Option<&[f64]> {
        self.columns.get(technology).map(Vec::as_slice)
    }

    /// Availability of `technology` at the `pos`-th interval.
    pub fn availability(&self, technology: &str, pos: usize) -> Option<f64> {
        self.columns.get(technology).map(|series| series[pos])
    }

    pub fn window(&self, start: usize, len: usize) -> VariableTraces {
        VariableTraces {
            intervals: (0..len as i64).collect(),
            columns: self
                .columns
                .iter()
                .map(|(tech, series)| (tech.clone(), series[start..start + len].to_vec()))
                .collect(),
        }
    }
}

/// Left-boundary conditions for the state-tracking variables.
///
/// Columns are `(variable name, relative interval)` pairs where the interval
/// is negative relative to the first modeled interval; rows are units. A
/// missing cell (or a wholly absent table) reads as 0, which keeps the
/// variable count independent of history depth.
#[derive(Debug, Clone, Default)]
pub struct InitialState {
    columns: Vec<(String, i64)>,
    rows: IndexMap<String, Vec<f64>>,
}

impl InitialState {
    /// Recognized state-variable column names.
    pub const NUM_COMMITTED: &'static str = "num_committed";
    pub const NUM_STARTING_UP: &'static str = "num_starting_up";
    pub const NUM_SHUTTING_DOWN: &'static str = "num_shutting_down";
    pub const POWER_GENERATED: &'static str = "power_generated";
    pub const STORED_ENERGY: &'static str = "stored_energy";

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(columns: Vec<(String, i64)>, rows: IndexMap<String, Vec<f64>>) -> Self {
        debug_assert!(rows.values().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[(String, i64)] {
        &self.columns
    }

    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn row(&self, unit: &str) -> Option<&[f64]> {
        self.rows.get(unit).map(Vec::as_slice)
    }

    /// The recorded value for `(variable, interval)` on `unit`, or 0.
    pub fn value(&self, unit: &str, variable: &str, interval: i64) -> f64 {
        let Some(row) = self.rows.get(unit) else {
            return 0.0;
        };
        self.columns
            .iter()
            .position(|(name, i)| name == variable && *i == interval)
            .map_or(0.0, |col| row[col])
    }
}

/// The fully loaded problem data handed to the formulation.
#[derive(Debug, Clone)]
pub struct UcData {
    pub fleet: FleetData,
    pub demand: DemandTrace,
    pub variable_traces: Option<VariableTraces>,
    pub initial_state: InitialState,
    pub interval_duration_hrs: f64,
    pub value_of_lost_load_per_mwh: f64,
}

impl UcData {
    /// Eager consistency checks: trace lengths must agree and every
    /// variable unit's technology needs a trace column when traces exist.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(traces) = &self.variable_traces {
            if traces.len() != self.demand.len() {
                return Err(CoreError::TraceLengthMismatch {
                    demand: self.demand.len(),
                    traces: traces.len(),
                });
            }
            for record in self.fleet.records() {
                if record.technology.is_variable()
                    && traces.series(&record.technology.to_string()).is_none()
                {
                    return Err(CoreError::MissingTrace {
                        unit: record.name.clone(),
                        technology: record.technology.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn thermal(name: &str, capacity_mw: f64, num_units: u32) -> UnitRecord {
        UnitRecord {
            name: name.to_string(),
            technology: Technology::Coal,
            capacity_mw,
            num_units,
            fuel_cost_per_gj: 1.0,
            thermal_efficiency_frac: 0.36,
            vom_per_mwh: 1.0,
            minimum_generation_frac: 0.5,
            minimum_up_time_hrs: 4.0,
            minimum_down_time_hrs: 2.0,
            ramp_rate_frac_cap_per_hr: 0.2,
            storage_hrs: 0.0,
            round_trip_efficiency_frac: 0.0,
        }
    }

    #[test]
    fn technology_classes() {
        assert!(Technology::Coal.is_commit());
        assert!(Technology::Wind.is_variable());
        assert!(Technology::Storage.is_storage());
        assert!(Technology::Storage.is_reserve_eligible());
        assert!(!Technology::Wind.is_reserve_eligible());

        let odd: Technology = "Hydro".parse().unwrap();
        assert_eq!(odd, Technology::Other("Hydro".to_string()));
        assert!(!odd.is_commit() && !odd.is_variable() && !odd.is_storage());
    }

    #[test]
    fn fuel_cost_conversion() {
        let unit = thermal("U1", 100.0, 2);
        assert!((unit.fuel_cost_per_mwh() - 10.0).abs() < 1e-12);
        assert_eq!(unit.fleet_capacity_mw(), 200.0);
    }

    #[test]
    fn ramp_capacities_use_the_larger_of_rate_and_min_gen() {
        let unit = thermal("U1", 100.0, 1);
        assert_eq!(unit.ramp_online_mw(), 20.0);
        // min gen (0.5) dominates the ramp rate (0.2) across transitions
        assert_eq!(unit.ramp_startup_mw(), 50.0);
        assert_eq!(unit.ramp_shutdown_mw(), 50.0);
    }

    #[test]
    fn fleet_subsets_follow_technology() {
        let mut wind = thermal("W1", 50.0, 10);
        wind.technology = Technology::Wind;
        let mut battery = thermal("B1", 25.0, 4);
        battery.technology = Technology::Storage;
        let fleet = FleetData::new(vec![thermal("U1", 100.0, 2), wind, battery]);

        assert_eq!(fleet.commit_units(), vec!["U1"]);
        assert_eq!(fleet.variable_units(), vec!["W1"]);
        assert_eq!(fleet.storage_units(), vec!["B1"]);
        assert_eq!(fleet.reserve_units(), vec!["U1", "B1"]);
    }

    #[test]
    fn initial_state_defaults_to_zero() {
        let state = InitialState::new(
            vec![
                ("num_committed".to_string(), -1),
                ("num_starting_up".to_string(), -2),
            ],
            IndexMap::from([("U1".to_string(), vec![2.0, 1.0])]),
        );
        assert_eq!(state.value("U1", "num_committed", -1), 2.0);
        assert_eq!(state.value("U1", "num_starting_up", -2), 1.0);
        assert_eq!(state.value("U1", "num_starting_up", -1), 0.0);
        assert_eq!(state.value("U2", "num_committed", -1), 0.0);
        assert_eq!(InitialState::empty().value("U1", "stored_energy", -1), 0.0);
    }

    #[test]
    fn unit_record_serde_round_trip() {
        let unit = thermal("U1", 100.0, 2);
        let json = serde_json::to_string(&unit).unwrap();
        let back: UnitRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "U1");
        assert_eq!(back.technology, Technology::Coal);
        assert_eq!(back.num_units, 2);
    }

    #[test]
    fn demand_window_reindexes_from_zero() {
        let demand = DemandTrace::new((0..6).collect(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let day2 = demand.window(3, 3);
        assert_eq!(day2.intervals().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(day2.megawatts(), &[4.0, 5.0, 6.0]);
    }
}
