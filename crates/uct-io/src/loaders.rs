//! Eager CSV loaders for the input tables.

use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use uct_core::{
    DemandTrace, FleetData, SettingValue, Settings, Technology, UnitRecord, VariableTraces,
};

use crate::error::IoError;
use crate::paths::check_path_exists;

/// Numeric catalog columns, in record-field order. Cells that are empty or
/// belong to an absent column load as 0.
const UNIT_NUMERIC_COLUMNS: [&str; 11] = [
    "CapacityMW",
    "NumUnits",
    "FuelCost$/GJ",
    "ThermalEfficiencyFrac",
    "VOM$/MWh",
    "MinimumGenerationFrac",
    "MinimumUpTimeHrs",
    "MinimumDownTimeHrs",
    "RampRate_pctCapphr",
    "StorageHrs",
    "RoundTripEfficiencyFrac",
];

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>, IoError> {
    csv::Reader::from_path(path).map_err(|e| IoError::csv(path, e))
}

fn header_position(headers: &csv::StringRecord, column: &str) -> Option<usize> {
    headers.iter().position(|h| h == column)
}

fn require_column(
    headers: &csv::StringRecord,
    column: &str,
    path: &Path,
) -> Result<usize, IoError> {
    header_position(headers, column).ok_or_else(|| IoError::MissingColumn {
        path: path.to_path_buf(),
        column: column.to_string(),
    })
}

fn parse_cell_f64(cell: Option<&str>, path: &Path, context: &str) -> Result<f64, IoError> {
    match cell.map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(text) => text
            .parse()
            .map_err(|_| IoError::parse(path, format!("{context}: cannot parse {text:?} as a number"))),
    }
}

/// Read `settings.csv` and convert each parameter to its declared type.
pub fn load_settings(path: &Path) -> Result<Settings, IoError> {
    check_path_exists(path, "settings file", true)?;
    let mut reader = open_reader(path)?;
    let headers = reader.headers().map_err(|e| IoError::csv(path, e))?.clone();
    let parameter = require_column(&headers, "Parameter", path)?;
    let type_col = require_column(&headers, "Type", path)?;
    let value_col = require_column(&headers, "Value", path)?;

    let mut values = IndexMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        let key = record.get(parameter).unwrap_or("").trim().to_string();
        let key_type = record.get(type_col).unwrap_or("").trim();
        let raw = record.get(value_col).unwrap_or("").trim();

        let value = match key_type {
            "int" => SettingValue::Int(raw.parse().map_err(|_| {
                IoError::parse(path, format!("setting {key}: {raw:?} is not an int"))
            })?),
            "float" => SettingValue::Float(raw.parse().map_err(|_| {
                IoError::parse(path, format!("setting {key}: {raw:?} is not a float"))
            })?),
            "str" => SettingValue::Str(raw.to_string()),
            "bool" => match raw.to_lowercase().as_str() {
                "true" => SettingValue::Bool(true),
                "false" => SettingValue::Bool(false),
                _ => {
                    return Err(IoError::parse(
                        path,
                        format!("setting {key}: {raw:?} is not a boolean"),
                    ))
                }
            },
            other => {
                return Err(IoError::parse(
                    path,
                    format!("setting {key}: unknown type {other:?}"),
                ))
            }
        };
        values.insert(key, value);
    }

    Ok(Settings::from_values(&values)?)
}

/// Read `unit_data.csv` into the fleet catalog, Unit-indexed.
pub fn load_unit_data(path: &Path) -> Result<FleetData, IoError> {
    check_path_exists(path, "unit data file", true)?;
    let mut reader = open_reader(path)?;
    let headers = reader.headers().map_err(|e| IoError::csv(path, e))?.clone();
    let unit_col = require_column(&headers, "Unit", path)?;
    let tech_col = require_column(&headers, "Technology", path)?;
    let numeric_cols: Vec<Option<usize>> = UNIT_NUMERIC_COLUMNS
        .iter()
        .map(|column| header_position(&headers, column))
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        let name = record.get(unit_col).unwrap_or("").trim().to_string();
        let technology: Technology = record
            .get(tech_col)
            .unwrap_or("")
            .trim()
            .parse()
            .unwrap_or(Technology::Other(String::new()));

        let mut numbers = [0.0_f64; UNIT_NUMERIC_COLUMNS.len()];
        for (slot, col) in numbers.iter_mut().zip(&numeric_cols) {
            *slot = parse_cell_f64(
                col.and_then(|c| record.get(c)),
                path,
                &format!("unit {name}"),
            )?;
        }

        records.push(UnitRecord {
            name,
            technology,
            capacity_mw: numbers[0],
            num_units: numbers[1] as u32,
            fuel_cost_per_gj: numbers[2],
            thermal_efficiency_frac: numbers[3],
            vom_per_mwh: numbers[4],
            minimum_generation_frac: numbers[5],
            minimum_up_time_hrs: numbers[6],
            minimum_down_time_hrs: numbers[7],
            ramp_rate_frac_cap_per_hr: numbers[8],
            storage_hrs: numbers[9],
            round_trip_efficiency_frac: numbers[10],
        });
    }

    Ok(FleetData::new(records))
}

/// Read `demand.csv`, Interval-indexed, single `Demand` column in MW.
pub fn load_demand_data(path: &Path) -> Result<DemandTrace, IoError> {
    check_path_exists(path, "demand file", true)?;
    let mut reader = open_reader(path)?;
    let headers = reader.headers().map_err(|e| IoError::csv(path, e))?.clone();
    let interval_col = require_column(&headers, "Interval", path)?;
    let demand_col = require_column(&headers, "Demand", path)?;

    let mut intervals = Vec::new();
    let mut megawatts = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        let interval = record
            .get(interval_col)
            .unwrap_or("")
            .trim()
            .parse()
            .map_err(|_| IoError::parse(path, "Interval column must hold integers"))?;
        intervals.push(interval);
        megawatts.push(parse_cell_f64(
            record.get(demand_col),
            path,
            &format!("interval {interval}"),
        )?);
    }

    Ok(DemandTrace::new(intervals, megawatts))
}

/// Read `variable_traces.csv` if present: Interval index plus one
/// availability column per technology. An absent file means no
/// variable-resource constraint will be emitted.
pub fn load_variable_traces(path: &Path) -> Result<Option<VariableTraces>, IoError> {
    if !check_path_exists(path, "variable trace file", false)? {
        return Ok(None);
    }
    let mut reader = open_reader(path)?;
    let headers = reader.headers().map_err(|e| IoError::csv(path, e))?.clone();
    let interval_col = require_column(&headers, "Interval", path)?;

    let tech_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != interval_col)
        .map(|(i, name)| (i, name.to_string()))
        .collect();

    let mut intervals = Vec::new();
    let mut columns: IndexMap<String, Vec<f64>> = tech_cols
        .iter()
        .map(|(_, name)| (name.clone(), Vec::new()))
        .collect();

    for record in reader.records() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        let interval: i64 = record
            .get(interval_col)
            .unwrap_or("")
            .trim()
            .parse()
            .map_err(|_| IoError::parse(path, "Interval column must hold integers"))?;
        intervals.push(interval);
        for (col, name) in &tech_cols {
            let value = parse_cell_f64(
                record.get(*col),
                path,
                &format!("trace {name}, interval {interval}"),
            )?;
            columns
                .get_mut(name)
                .expect("trace column initialized from header")
                .push(value);
        }
    }

    debug!(
        technologies = columns.len(),
        intervals = intervals.len(),
        "loaded variable traces"
    );
    Ok(Some(VariableTraces::new(intervals, columns)))
}

/// Write a demand trace in the `demand.csv` layout. The rolling driver uses
/// this to scope each day's window.
pub fn write_demand_data(path: &Path, demand: &DemandTrace) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::csv(path, e))?;
    writer
        .write_record(["Interval", "Demand"])
        .map_err(|e| IoError::csv(path, e))?;
    for (interval, mw) in demand.intervals().zip(demand.megawatts()) {
        writer
            .write_record([interval.to_string(), mw.to_string()])
            .map_err(|e| IoError::csv(path, e))?;
    }
    writer.flush().map_err(|e| IoError::io(path, e))?;
    Ok(())
}

/// Write variable traces in the `variable_traces.csv` layout.
pub fn write_variable_traces(path: &Path, traces: &VariableTraces) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::csv(path, e))?;
    let mut header = vec!["Interval".to_string()];
    header.extend(traces.technologies().map(String::from));
    writer.write_record(&header).map_err(|e| IoError::csv(path, e))?;

    for (pos, interval) in traces.intervals().enumerate() {
        let mut record = vec![interval.to_string()];
        for technology in traces.technologies() {
            let value = traces
                .availability(technology, pos)
                .expect("technology column listed in the header");
            record.push(value.to_string());
        }
        writer.write_record(&record).map_err(|e| IoError::csv(path, e))?;
    }
    writer.flush().map_err(|e| IoError::io(path, e))?;
    Ok(())
}
