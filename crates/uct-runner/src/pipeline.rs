//! The single-run pipeline.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use uct_core::{InitialState, ResultTable, Sets, UcData};
use uct_io::{
    load_constraint_list, load_demand_data, load_initial_state, load_settings, load_unit_data,
    load_variable_traces, make_results_folders, write_results, ProblemPaths,
};
use uct_model::{assemble_problem, SolveReport, SolverConfig};

/// The pipeline's result: the solver report and, when optimal, the
/// extracted tables (also written to the results directory).
pub struct PipelineOutcome {
    pub report: SolveReport,
    pub tables: Option<Vec<ResultTable>>,
}

/// Load every input table under `paths` into problem data.
fn load_data(paths: &ProblemPaths, interval_duration_hrs: f64, voll: f64) -> Result<UcData> {
    let data = UcData {
        fleet: load_unit_data(&paths.unit_data)?,
        demand: load_demand_data(&paths.demand)?,
        variable_traces: load_variable_traces(&paths.variable_traces)?,
        initial_state: load_initial_state(&paths.initial_state)?
            .unwrap_or_else(InitialState::empty),
        interval_duration_hrs,
        value_of_lost_load_per_mwh: voll,
    };
    data.validate()?;
    Ok(data)
}

/// Run the full pipeline for one problem directory: build paths, load
/// settings and data, create sets and variables, select and attach
/// constraints, add the objective, solve, extract.
pub fn run_pipeline(
    name: &str,
    input_data_path: &Path,
    output_data_path: &Path,
) -> Result<PipelineOutcome> {
    info!(name, input = %input_data_path.display(), "setting up problem");

    let paths = ProblemPaths::new(input_data_path, output_data_path, name);
    let settings = load_settings(&paths.settings).context("loading settings")?;
    make_results_folders(&paths).context("preparing output directories")?;

    let data = load_data(
        &paths,
        settings.interval_duration_hrs,
        settings.value_of_lost_load_per_mwh,
    )
    .context("loading problem data")?;
    let sets = Sets::from_data(&data, settings.reserves).context("creating sets")?;

    let toggles =
        load_constraint_list(&paths.constraint_list).context("loading constraint list")?;
    let problem =
        assemble_problem(name, &sets, &data, &toggles).context("assembling the MILP")?;

    let solved = uct_model::solve(problem, &SolverConfig::default());

    let report_path = paths.outputs.join("report.json");
    let report_json =
        serde_json::to_string_pretty(&solved.report).context("serializing the solve report")?;
    fs::write(&report_path, report_json)
        .with_context(|| format!("writing {}", report_path.display()))?;

    if let Some(tables) = &solved.tables {
        write_results(&paths.results, tables).context("writing result tables")?;
    }

    Ok(PipelineOutcome {
        report: solved.report,
        tables: solved.tables,
    })
}

/// Solve one problem directory and return the solver report.
///
/// This is the synchronous, single-shot entry point; results land under
/// `<output_data_path>/<name>/results/`.
pub fn run_opt_problem(
    name: &str,
    input_data_path: &Path,
    output_data_path: &Path,
) -> Result<SolveReport> {
    run_pipeline(name, input_data_path, output_data_path).map(|outcome| outcome.report)
}
