//! Rolling-horizon driver.
//!
//! Long traces are chopped into day-sized chunks. Each chunk gets its own
//! scoped input directory (windowed demand and traces plus copies of the
//! static tables), is solved through the regular pipeline, and hands its
//! final state forward: the last-interval commitment, output and stored
//! energy plus the last K startup/shutdown counts, where K is the deepest
//! up/down-time lookback in the fleet. Losing any of those columns would
//! shift the feasible region of the next chunk.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, warn};

use uct_core::{Element, FleetData, InitialState, ResultTable};
use uct_io::{
    load_constraint_list, load_demand_data, load_initial_state, load_settings, load_unit_data,
    load_variable_traces, make_results_folders, write_demand_data, write_initial_state,
    write_variable_traces, ProblemPaths,
};
use uct_model::SolveReport;

use crate::pipeline::run_pipeline;

/// Per-day reports of one series run.
#[derive(Debug, Serialize)]
pub struct SeriesSummary {
    pub name: String,
    pub days: Vec<SolveReport>,
    /// False when a day ended without an optimum and the series stopped.
    pub completed: bool,
}

/// Solve a long horizon day by day, threading the final state of each day
/// into the next day's initial-state table.
pub fn run_series_problem(
    name: &str,
    input_data_path: &Path,
    output_data_path: &Path,
) -> Result<SeriesSummary> {
    let paths = ProblemPaths::new(input_data_path, output_data_path, name);
    let settings = load_settings(&paths.settings).context("loading settings")?;
    let fleet = load_unit_data(&paths.unit_data).context("loading unit data")?;
    let demand = load_demand_data(&paths.demand).context("loading the demand trace")?;
    let traces = load_variable_traces(&paths.variable_traces).context("loading variable traces")?;
    // fail early, with the file's role, rather than on the first day's copy
    let toggles =
        load_constraint_list(&paths.constraint_list).context("loading constraint list")?;

    if let Some(traces) = &traces {
        if traces.len() != demand.len() {
            bail!(
                "length of demand trace ({}) and variable traces ({}) are unequal",
                demand.len(),
                traces.len()
            );
        }
    }

    let dt = settings.interval_duration_hrs;
    let per_day = 24.0 / dt;
    if !per_day.is_finite() || per_day < 1.0 || (per_day - per_day.round()).abs() > 1e-9 {
        bail!("IntervalDurationHrs {dt} does not divide a day into whole intervals");
    }
    let per_day = per_day.round() as usize;
    let days_per_solve = settings.days_per_solve.unwrap_or(1).max(1) as usize;
    let chunk_len = per_day * days_per_solve;
    if demand.len() % chunk_len != 0 {
        bail!(
            "trace length {} is not a whole number of {}-interval solves",
            demand.len(),
            chunk_len
        );
    }
    let num_chunks = demand.len() / chunk_len;

    make_results_folders(&paths).context("preparing output directories")?;
    let days_root = paths.outputs.join("days");
    fs::create_dir_all(&days_root)
        .with_context(|| format!("creating {}", days_root.display()))?;

    let lookback = state_lookback(&fleet);
    let mut carried = load_initial_state(&paths.initial_state)?;

    info!(
        name,
        chunks = num_chunks,
        intervals_per_chunk = chunk_len,
        lookback,
        families = toggles.iter().filter(|toggle| toggle.include).count(),
        "starting series run"
    );

    let mut days = Vec::new();
    let mut completed = true;
    for k in 0..num_chunks {
        let day_name = format!("day_{k}");
        let day_dir = days_root.join(&day_name);
        let inputs_dir = day_dir.join("inputs");
        fs::create_dir_all(&inputs_dir)
            .with_context(|| format!("creating {}", inputs_dir.display()))?;

        let start = k * chunk_len;
        write_demand_data(
            &inputs_dir.join("demand.csv"),
            &demand.window(start, chunk_len),
        )?;
        if let Some(traces) = &traces {
            write_variable_traces(
                &inputs_dir.join("variable_traces.csv"),
                &traces.window(start, chunk_len),
            )?;
        }
        for file in ["settings.csv", "unit_data.csv", "constraint_list.csv"] {
            fs::copy(paths.input_data.join(file), inputs_dir.join(file))
                .with_context(|| format!("copying {file} for {day_name}"))?;
        }
        if let Some(state) = &carried {
            write_initial_state(&inputs_dir.join("initial_state.csv"), state)?;
        }

        let outcome = run_pipeline(&day_name, &inputs_dir, &day_dir.join("outputs"))
            .with_context(|| format!("solving {day_name}"))?;
        let optimal = outcome.report.is_optimal();
        days.push(outcome.report);

        if !optimal {
            warn!(day = %day_name, "day ended without an optimum; stopping the series");
            completed = false;
            break;
        }

        let tables = outcome
            .tables
            .expect("an optimal solve always extracts tables");
        carried = Some(next_initial_state(&fleet, &tables, chunk_len as i64, lookback));
    }

    let summary = SeriesSummary {
        name: name.to_string(),
        days,
        completed,
    };
    let report_path = paths.outputs.join("report.json");
    let report_json =
        serde_json::to_string_pretty(&summary).context("serializing the series report")?;
    fs::write(&report_path, report_json)
        .with_context(|| format!("writing {}", report_path.display()))?;

    Ok(summary)
}

/// The deepest up/down-time window across the committable fleet; at least
/// one interval so the final commitment transition always carries over.
fn state_lookback(fleet: &FleetData) -> i64 {
    fleet
        .records()
        .filter(|record| record.technology.is_commit())
        .map(|record| record.up_time_intervals().max(record.down_time_intervals()))
        .max()
        .unwrap_or(1)
        .max(1)
}

fn find_table<'a>(tables: &'a [ResultTable], name: &str) -> Option<&'a ResultTable> {
    tables.iter().find(|table| table.name() == name)
}

/// Build the next chunk's initial state from this chunk's solved tables.
///
/// Column `-j` maps to the chunk's interval `chunk_len - j`, so the next
/// chunk's interval 0 continues the sequence seamlessly.
fn next_initial_state(
    fleet: &FleetData,
    tables: &[ResultTable],
    chunk_len: i64,
    lookback: i64,
) -> InitialState {
    let committed = find_table(tables, "num_committed");
    let starting = find_table(tables, "num_starting_up");
    let stopping = find_table(tables, "num_shutting_down");
    let power = find_table(tables, "power_generated");
    let energy = find_table(tables, "stored_energy");

    let cell = |table: Option<&ResultTable>, interval: i64, unit: &str| -> f64 {
        table
            .and_then(|t| t.value(&[Element::interval(interval)], unit))
            .unwrap_or(0.0)
    };
    let last = chunk_len - 1;

    let mut columns = vec![(InitialState::NUM_COMMITTED.to_string(), -1)];
    for j in 1..=lookback {
        columns.push((InitialState::NUM_STARTING_UP.to_string(), -j));
    }
    for j in 1..=lookback {
        columns.push((InitialState::NUM_SHUTTING_DOWN.to_string(), -j));
    }
    columns.push((InitialState::POWER_GENERATED.to_string(), -1));
    columns.push((InitialState::STORED_ENERGY.to_string(), -1));

    let mut rows: IndexMap<String, Vec<f64>> = IndexMap::new();
    for record in fleet.records() {
        let unit = record.name.as_str();
        let mut values = Vec::with_capacity(columns.len());
        values.push(cell(committed, last, unit).round());
        for j in 1..=lookback {
            values.push(cell(starting, chunk_len - j, unit).round());
        }
        for j in 1..=lookback {
            values.push(cell(stopping, chunk_len - j, unit).round());
        }
        values.push(cell(power, last, unit));
        values.push(cell(energy, last, unit));
        rows.insert(unit.to_string(), values);
    }

    InitialState::new(columns, rows)
}
