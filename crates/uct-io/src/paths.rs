//! Per-problem path layout and the results folder policy.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::IoError;

/// Every input and output path of one problem, resolved up front.
#[derive(Debug, Clone)]
pub struct ProblemPaths {
    pub input_data: PathBuf,
    pub settings: PathBuf,
    pub unit_data: PathBuf,
    pub variable_traces: PathBuf,
    pub initial_state: PathBuf,
    pub demand: PathBuf,
    pub reserve_requirement: PathBuf,
    pub constraint_list: PathBuf,
    pub outputs: PathBuf,
    pub results: PathBuf,
}

impl ProblemPaths {
    pub fn new(input_data_path: &Path, output_data_path: &Path, name: &str) -> Self {
        let input = input_data_path.to_path_buf();
        let outputs = output_data_path.join(name);
        Self {
            settings: input.join("settings.csv"),
            unit_data: input.join("unit_data.csv"),
            variable_traces: input.join("variable_traces.csv"),
            initial_state: input.join("initial_state.csv"),
            demand: input.join("demand.csv"),
            reserve_requirement: input.join("reserve_requirement.csv"),
            constraint_list: input.join("constraint_list.csv"),
            results: outputs.join("results"),
            outputs,
            input_data: input,
        }
    }
}

/// Check a file exists, failing with its role when it is required.
///
/// Optional files report back `false` so callers can elide whatever the
/// file would have configured.
pub fn check_path_exists(path: &Path, role: &'static str, required: bool) -> Result<bool, IoError> {
    if path.exists() {
        return Ok(true);
    }
    if required {
        return Err(IoError::MissingRequiredFile {
            role,
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), role, "optional input absent");
    Ok(false)
}

/// Create the output and results directories, replacing existing contents.
///
/// The run exclusively owns its output directory: a leftover tree from an
/// earlier run is removed wholesale before recreation.
pub fn make_results_folders(paths: &ProblemPaths) -> Result<(), IoError> {
    for dir in [&paths.outputs, &paths.results] {
        if dir.exists() {
            fs::remove_dir_all(dir).map_err(|e| IoError::io(dir, e))?;
        }
        fs::create_dir_all(dir).map_err(|e| IoError::io(dir, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn paths_are_rooted_at_inputs_and_outputs() {
        let paths = ProblemPaths::new(Path::new("/in"), Path::new("/out"), "case1");
        assert_eq!(paths.demand, Path::new("/in/demand.csv"));
        assert_eq!(paths.constraint_list, Path::new("/in/constraint_list.csv"));
        assert_eq!(paths.outputs, Path::new("/out/case1"));
        assert_eq!(paths.results, Path::new("/out/case1/results"));
    }

    #[test]
    fn missing_required_file_reports_role_and_path() {
        let err = check_path_exists(Path::new("/nowhere/demand.csv"), "demand file", true)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("demand file"));
        assert!(msg.contains("/nowhere/demand.csv"));
    }

    #[test]
    fn missing_optional_file_is_not_an_error() {
        let found =
            check_path_exists(Path::new("/nowhere/traces.csv"), "variable trace file", false)
                .unwrap();
        assert!(!found);
    }

    #[test]
    fn results_folders_are_replaced() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = ProblemPaths::new(tmp.path(), tmp.path(), "case1");

        make_results_folders(&paths).unwrap();
        let stale = paths.results.join("stale.csv");
        let mut file = File::create(&stale).unwrap();
        writeln!(file, "old").unwrap();

        make_results_folders(&paths).unwrap();
        assert!(paths.results.exists());
        assert!(!stale.exists());
    }
}
