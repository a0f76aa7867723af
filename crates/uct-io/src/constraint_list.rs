//! The constraint toggle list: which families to materialize.

use std::path::Path;

use uct_core::ConstraintToggle;

use crate::error::IoError;
use crate::paths::check_path_exists;

/// Read `constraint_list.csv` (`ID,ToInclude`), normalizing the boolean
/// spellings `true/True/TRUE` and `false/False/FALSE`.
///
/// ID validation happens in the registry; this loader only decodes rows.
pub fn load_constraint_list(path: &Path) -> Result<Vec<ConstraintToggle>, IoError> {
    check_path_exists(path, "constraint list file", true)?;
    let mut reader = csv::Reader::from_path(path).map_err(|e| IoError::csv(path, e))?;
    let headers = reader.headers().map_err(|e| IoError::csv(path, e))?.clone();
    let id_col = headers
        .iter()
        .position(|h| h == "ID")
        .ok_or_else(|| IoError::MissingColumn {
            path: path.to_path_buf(),
            column: "ID".to_string(),
        })?;
    let include_col = headers
        .iter()
        .position(|h| h == "ToInclude")
        .ok_or_else(|| IoError::MissingColumn {
            path: path.to_path_buf(),
            column: "ToInclude".to_string(),
        })?;

    let mut toggles = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        let id = record.get(id_col).unwrap_or("").trim().to_string();
        let raw = record.get(include_col).unwrap_or("").trim();
        let include = match raw.to_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => {
                return Err(IoError::parse(
                    path,
                    format!("constraint {id}: ToInclude value {raw:?} is not a boolean"),
                ))
            }
        };
        toggles.push(ConstraintToggle { id, include });
    }

    Ok(toggles)
}
