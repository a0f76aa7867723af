//! Codec for the two-level-header initial-state table.
//!
//! The on-disk layout mirrors a pandas MultiIndex frame: the first header
//! row names the state variable for each column, the second the relative
//! interval (negative, counted back from the first modeled interval), and
//! an optional third row carries only the index name (`Unit`). Data rows
//! are unit-indexed.
//!
//! ```csv
//! Variable,num_committed,num_starting_up,num_starting_up
//! Interval,-1,-1,-2
//! Unit,,,
//! U1,2,1,0
//! ```

use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use uct_core::InitialState;

use crate::error::IoError;
use crate::paths::check_path_exists;

/// Read `initial_state.csv` if present; an absent file reads as all zeros.
pub fn load_initial_state(path: &Path) -> Result<Option<InitialState>, IoError> {
    if !check_path_exists(path, "initial state file", false)? {
        return Ok(None);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IoError::csv(path, e))?;

    let mut records = reader.records();
    let variables = records
        .next()
        .transpose()
        .map_err(|e| IoError::csv(path, e))?
        .ok_or_else(|| IoError::parse(path, "missing the variable header row"))?;
    let intervals = records
        .next()
        .transpose()
        .map_err(|e| IoError::csv(path, e))?
        .ok_or_else(|| IoError::parse(path, "missing the interval header row"))?;

    if variables.len() != intervals.len() {
        return Err(IoError::parse(
            path,
            "variable and interval header rows differ in length",
        ));
    }

    let columns: Vec<(String, i64)> = variables
        .iter()
        .zip(intervals.iter())
        .skip(1)
        .map(|(name, interval)| {
            let interval = interval.trim().parse().map_err(|_| {
                IoError::parse(
                    path,
                    format!("column {name}: interval {interval:?} is not an integer"),
                )
            })?;
            Ok((name.trim().to_string(), interval))
        })
        .collect::<Result<_, IoError>>()?;

    let mut rows: IndexMap<String, Vec<f64>> = IndexMap::new();
    for record in records {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        let unit = record.get(0).unwrap_or("").trim().to_string();
        if unit.is_empty() {
            continue;
        }
        // Pandas emits an index-name row ("Unit") with empty value cells.
        let is_index_name_row =
            unit == "Unit" && record.iter().skip(1).all(|cell| cell.trim().is_empty());
        if is_index_name_row {
            continue;
        }

        let mut values = Vec::with_capacity(columns.len());
        for (col, (name, interval)) in columns.iter().enumerate() {
            let cell = record.get(col + 1).unwrap_or("").trim();
            let value = if cell.is_empty() {
                0.0
            } else {
                cell.parse().map_err(|_| {
                    IoError::parse(
                        path,
                        format!("unit {unit}, column ({name},{interval}): {cell:?} is not a number"),
                    )
                })?
            };
            values.push(value);
        }
        rows.insert(unit, values);
    }

    debug!(units = rows.len(), columns = columns.len(), "loaded initial state");
    Ok(Some(InitialState::new(columns, rows)))
}

/// Write an initial-state table in the same two-level-header layout.
pub fn write_initial_state(path: &Path, state: &InitialState) -> Result<(), IoError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| IoError::csv(path, e))?;

    let mut variable_row = vec!["Variable".to_string()];
    let mut interval_row = vec!["Interval".to_string()];
    for (name, interval) in state.columns() {
        variable_row.push(name.clone());
        interval_row.push(interval.to_string());
    }
    writer
        .write_record(&variable_row)
        .and_then(|_| writer.write_record(&interval_row))
        .map_err(|e| IoError::csv(path, e))?;

    let mut index_name_row = vec!["Unit".to_string()];
    index_name_row.resize(variable_row.len(), String::new());
    writer
        .write_record(&index_name_row)
        .map_err(|e| IoError::csv(path, e))?;

    for unit in state.units() {
        let mut row = vec![unit.to_string()];
        if let Some(values) = state.row(unit) {
            row.extend(values.iter().map(|v| v.to_string()));
        }
        writer.write_record(&row).map_err(|e| IoError::csv(path, e))?;
    }

    writer.flush().map_err(|e| IoError::io(path, e))?;
    Ok(())
}
