//! Result-table serialization: one CSV per decision variable.

use std::path::Path;

use tracing::info;

use uct_core::ResultTable;

use crate::error::IoError;

/// Write every table into `dir` under its `<name>_<units>.csv` filename.
pub fn write_results(dir: &Path, tables: &[ResultTable]) -> Result<(), IoError> {
    for table in tables {
        write_table(dir, table)?;
    }
    info!(tables = tables.len(), dir = %dir.display(), "results written");
    Ok(())
}

/// Write one result table. Integer variables serialize without a fractional
/// part, continuous ones with full float formatting.
pub fn write_table(dir: &Path, table: &ResultTable) -> Result<(), IoError> {
    let path = dir.join(table.filename());
    let mut writer = csv::Writer::from_path(&path).map_err(|e| IoError::csv(&path, e))?;

    let header: Vec<&str> = table
        .index_names()
        .iter()
        .map(String::as_str)
        .chain(table.columns().iter().map(String::as_str))
        .collect();
    writer.write_record(&header).map_err(|e| IoError::csv(&path, e))?;

    for (key, values) in table.rows() {
        let mut record: Vec<String> = key.iter().map(ToString::to_string).collect();
        for value in values {
            if table.integral() {
                record.push(format!("{}", value.round() as i64));
            } else {
                record.push(value.to_string());
            }
        }
        writer.write_record(&record).map_err(|e| IoError::csv(&path, e))?;
    }

    writer.flush().map_err(|e| IoError::io(&path, e))?;
    Ok(())
}

/// A result CSV read back into memory, split at `index_cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub index_names: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<(Vec<String>, Vec<f64>)>,
}

/// Read a result table written by [`write_table`]. The caller states how
/// many leading columns form the row index (one per indexing set, except
/// the last set which spans the value columns).
pub fn read_table(path: &Path, index_cols: usize) -> Result<TableData, IoError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| IoError::csv(path, e))?;
    let headers = reader.headers().map_err(|e| IoError::csv(path, e))?.clone();
    if headers.len() < index_cols {
        return Err(IoError::parse(
            path,
            format!("expected at least {index_cols} index columns"),
        ));
    }

    let index_names = headers.iter().take(index_cols).map(String::from).collect();
    let columns = headers.iter().skip(index_cols).map(String::from).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        let key: Vec<String> = record.iter().take(index_cols).map(String::from).collect();
        let values = record
            .iter()
            .skip(index_cols)
            .map(|cell| {
                cell.trim().parse().map_err(|_| {
                    IoError::parse(path, format!("value {cell:?} is not a number"))
                })
            })
            .collect::<Result<Vec<f64>, IoError>>()?;
        rows.push((key, values));
    }

    Ok(TableData {
        index_names,
        columns,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uct_core::Element;

    fn two_dim_table() -> ResultTable {
        ResultTable::new(
            "power_generated",
            "MW",
            vec!["intervals".to_string()],
            vec!["U1".to_string(), "U2".to_string()],
            vec![
                (vec![Element::interval(0)], vec![200.0, 0.0]),
                (vec![Element::interval(1)], vec![187.5, 100.0]),
            ],
            false,
        )
    }

    #[test]
    fn written_table_reads_back_identically() {
        let tmp = TempDir::new().unwrap();
        let table = two_dim_table();
        write_table(tmp.path(), &table).unwrap();

        let data = read_table(&tmp.path().join("power_generated_MW.csv"), 1).unwrap();
        assert_eq!(data.index_names, vec!["intervals"]);
        assert_eq!(data.columns, vec!["U1", "U2"]);
        assert_eq!(
            data.rows,
            vec![
                (vec!["0".to_string()], vec![200.0, 0.0]),
                (vec!["1".to_string()], vec![187.5, 100.0]),
            ]
        );
    }

    #[test]
    fn integral_tables_write_whole_numbers() {
        let tmp = TempDir::new().unwrap();
        let table = ResultTable::new(
            "num_committed",
            "#Units",
            vec!["intervals".to_string()],
            vec!["U1".to_string()],
            vec![(vec![Element::interval(0)], vec![1.9999999])],
            true,
        );
        write_table(tmp.path(), &table).unwrap();
        let text = std::fs::read_to_string(tmp.path().join("num_committed_#Units.csv")).unwrap();
        assert_eq!(text, "intervals,U1\n0,2\n");
    }

    #[test]
    fn three_dim_layout_keeps_two_index_columns() {
        let tmp = TempDir::new().unwrap();
        let table = ResultTable::new(
            "reserve_enabled",
            "MW",
            vec!["intervals".to_string(), "units_reserve".to_string()],
            vec!["raise".to_string(), "lower".to_string()],
            vec![
                (
                    vec![Element::interval(0), Element::label("U1")],
                    vec![5.0, 3.0],
                ),
                (
                    vec![Element::interval(0), Element::label("B1")],
                    vec![0.0, 1.0],
                ),
            ],
            false,
        );
        write_table(tmp.path(), &table).unwrap();

        let data = read_table(&tmp.path().join("reserve_enabled_MW.csv"), 2).unwrap();
        assert_eq!(data.index_names, vec!["intervals", "units_reserve"]);
        assert_eq!(data.rows[1].0, vec!["0".to_string(), "B1".to_string()]);
        assert_eq!(data.rows[1].1, vec![0.0, 1.0]);
    }
}
