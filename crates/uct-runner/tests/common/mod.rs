//! Shared helpers for writing problem directories in tests.
#![allow(dead_code)] // not every test binary uses every helper

use std::fs;
use std::path::{Path, PathBuf};

pub const UNIT_HEADER: &str = "Unit,Technology,CapacityMW,NumUnits,FuelCost$/GJ,\
ThermalEfficiencyFrac,VOM$/MWh,MinimumGenerationFrac,MinimumUpTimeHrs,MinimumDownTimeHrs,\
RampRate_pctCapphr,StorageHrs,RoundTripEfficiencyFrac";

pub const ALL_CONSTRAINT_IDS: [&str; 15] = [
    "Supply==Demand",
    "Power<=Capacity",
    "Power<=CommittedCapacity",
    "Power>=MinimumGeneration",
    "NumCommitted<=NumUnits",
    "CommitmentContinuity",
    "CommitmentContinuityInitialInterval",
    "VariablePower<=ResourceAvailability",
    "MinimumUpTime",
    "MinimumDownTime",
    "RampRateUp",
    "RampRateDown",
    "PowerCharged<=ChargeCapacity",
    "StorageEnergyContinuity",
    "StoredEnergy<=StorageCapacity",
];

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub fn write_settings(dir: &Path, interval_duration_hrs: f64, voll: f64, extra: &str) {
    let contents = format!(
        "Parameter,Type,Value\n\
         IntervalDurationHrs,float,{interval_duration_hrs}\n\
         ValueOfLostLoad$/MWh,float,{voll}\n\
         reserves,str,None\n{extra}"
    );
    write_file(dir, "settings.csv", &contents);
}

pub fn write_demand(dir: &Path, demand: &[f64]) {
    let mut contents = String::from("Interval,Demand\n");
    for (i, mw) in demand.iter().enumerate() {
        contents.push_str(&format!("{i},{mw}\n"));
    }
    write_file(dir, "demand.csv", &contents);
}

pub fn write_constraint_list(dir: &Path, included: &[&str]) {
    let mut contents = String::from("ID,ToInclude\n");
    for id in ALL_CONSTRAINT_IDS {
        let flag = if included.contains(&id) { "True" } else { "False" };
        contents.push_str(&format!("{id},{flag}\n"));
    }
    write_file(dir, "constraint_list.csv", &contents);
}

pub fn write_units(dir: &Path, rows: &[&str]) {
    let mut contents = format!("{UNIT_HEADER}\n");
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    write_file(dir, "unit_data.csv", &contents);
}

/// Cell of a written result CSV, addressed by row index column values.
pub fn read_cell(path: &Path, key: &[&str], column: &str) -> f64 {
    let table = uct_io::read_table(path, key.len()).unwrap();
    let col = table
        .columns
        .iter()
        .position(|c| c == column)
        .unwrap_or_else(|| panic!("column {column} not found in {}", path.display()));
    table
        .rows
        .iter()
        .find(|(k, _)| k.iter().map(String::as_str).eq(key.iter().copied()))
        .map(|(_, values)| values[col])
        .unwrap_or_else(|| panic!("row {key:?} not found in {}", path.display()))
}
