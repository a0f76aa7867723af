//! End-to-end pipeline scenarios with known optima.

mod common;

use common::{
    read_cell, write_constraint_list, write_demand, write_file, write_settings, write_units,
    ALL_CONSTRAINT_IDS,
};
use tempfile::TempDir;
use uct_model::SolveStatus;
use uct_runner::{run_opt_problem, run_pipeline};

/// Two thermal fleets dispatched cheapest-first, with the tail of demand
/// unserved once capacity runs out.
///
/// U1: 100 MW x 2 at 11 $/MWh all-in, U2: 100 MW x 1 at 41 $/MWh,
/// demand [200, 300, 400] at half-hour intervals, VoLL 1000.
#[test]
fn thermal_only_cheapest_first_dispatch() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("inputs");
    std::fs::create_dir_all(&input).unwrap();

    write_settings(&input, 0.5, 1000.0, "");
    write_units(
        &input,
        &[
            "U1,Coal,100,2,1.0,0.36,1,1.0,1,1,1.0,,",
            "U2,OCGT,100,1,4.0,0.36,1,1.0,1,1,1.0,,",
        ],
    );
    write_demand(&input, &[200.0, 300.0, 400.0]);
    write_constraint_list(&input, &ALL_CONSTRAINT_IDS);

    let report = run_opt_problem("thermal_only", &input, tmp.path()).unwrap();
    assert_eq!(report.status, SolveStatus::Optimal);
    // 0.5 * (600 MWh * 11 + 200 MWh * 41 + 100 MWh * 1000)
    assert!((report.objective_value.unwrap() - 57_400.0).abs() < 1e-4);

    let results = tmp.path().join("thermal_only").join("results");
    let power = results.join("power_generated_MW.csv");
    for i in ["0", "1", "2"] {
        assert!((read_cell(&power, &[i], "U1") - 200.0).abs() < 1e-4);
    }
    assert!(read_cell(&power, &["0"], "U2").abs() < 1e-4);
    assert!((read_cell(&power, &["1"], "U2") - 100.0).abs() < 1e-4);

    // commitment counts are written as whole numbers
    let committed = results.join("num_committed_#Units.csv");
    assert_eq!(read_cell(&committed, &["0"], "U2"), 0.0);
    assert_eq!(read_cell(&committed, &["1"], "U2"), 1.0);

    let unserved = results.join("unserved_power_MW.csv");
    assert!(read_cell(&unserved, &["0"], "unserved_power").abs() < 1e-4);
    assert!((read_cell(&unserved, &["2"], "unserved_power") - 100.0).abs() < 1e-4);
}

/// Wind charges a battery in the first interval; the battery and a thermal
/// unit carry the evening, with 1 MW unserved at the peak.
#[test]
fn wind_plus_storage_arbitrage() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("inputs");
    std::fs::create_dir_all(&input).unwrap();

    write_settings(&input, 0.5, 1000.0, "");
    write_units(
        &input,
        &[
            "U1,CCGT,100,1,1.0,0.36,0,1.0,1,1,1.0,,",
            "W1,Wind,300,1,,,1,,,,,,",
            "B1,Storage,100,1,,,,,,,,1,0.8",
        ],
    );
    write_demand(&input, &[200.0, 181.0, 100.0]);
    write_file(
        &input,
        "variable_traces.csv",
        "Interval,Wind\n0,1.0\n1,0.0\n2,0.0\n",
    );
    write_constraint_list(&input, &ALL_CONSTRAINT_IDS);

    let outcome = run_pipeline("wind_storage", &input, tmp.path()).unwrap();
    assert_eq!(outcome.report.status, SolveStatus::Optimal);
    // 0.5 * (200 MWh-equivalent thermal * 10 + 300 * 1 + 1 * 1000)
    assert!((outcome.report.objective_value.unwrap() - 1_650.0).abs() < 1e-4);

    let results = tmp.path().join("wind_storage").join("results");
    // the battery fills to its 40 MWh half-hour yield, then empties
    let energy = results.join("stored_energy_MWh.csv");
    assert!((read_cell(&energy, &["0"], "B1") - 40.0).abs() < 1e-4);
    assert!(read_cell(&energy, &["2"], "B1").abs() < 1e-4);

    let charged = results.join("power_charged_MW.csv");
    assert!((read_cell(&charged, &["0"], "B1") - 80.0).abs() < 1e-4);

    let unserved = results.join("unserved_power_MW.csv");
    assert!((read_cell(&unserved, &["1"], "unserved_power") - 1.0).abs() < 1e-4);
}

/// Identical inputs produce identical objective values.
#[test]
fn repeated_runs_are_deterministic() {
    let run_once = || {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("inputs");
        std::fs::create_dir_all(&input).unwrap();
        write_settings(&input, 0.5, 1000.0, "");
        write_units(
            &input,
            &[
                "U1,Coal,100,2,1.0,0.36,1,1.0,1,1,1.0,,",
                "U2,OCGT,100,1,4.0,0.36,1,1.0,1,1,1.0,,",
            ],
        );
        write_demand(&input, &[200.0, 300.0, 400.0]);
        write_constraint_list(&input, &ALL_CONSTRAINT_IDS);
        run_opt_problem("repeat", &input, tmp.path())
            .unwrap()
            .objective_value
            .unwrap()
    };

    assert_eq!(run_once(), run_once());
}

/// A fleet that cannot serve demand and a pinned-down slack is infeasible;
/// the driver reports that as a status, writes no results, but still
/// writes the report.
#[test]
fn infeasible_outcome_is_a_clean_end_state() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("inputs");
    std::fs::create_dir_all(&input).unwrap();

    // A unit freshly started before the horizon cannot shut down inside
    // its three-interval up time, and min gen of 1.0 pins its output at
    // 100 MW; demand of 50 MW then breaks the balance because the
    // unserved slack cannot go negative.
    write_settings(&input, 1.0, 1000.0, "");
    write_units(&input, &["U1,Coal,100,1,1.0,0.36,1,1.0,3,1,1.0,,"]);
    write_file(
        &input,
        "initial_state.csv",
        "Variable,num_committed,num_starting_up\nInterval,-1,-1\nUnit,,\nU1,1,1\n",
    );
    write_demand(&input, &[50.0]);
    write_constraint_list(&input, &ALL_CONSTRAINT_IDS);

    let outcome = run_pipeline("stuck_on", &input, tmp.path()).unwrap();
    assert_eq!(outcome.report.status, SolveStatus::Infeasible);
    assert!(outcome.tables.is_none());
    assert!(outcome.report.objective_value.is_none());

    let outputs = tmp.path().join("stuck_on");
    assert!(outputs.join("report.json").exists());
    // results folder exists (created at setup) but holds no tables
    let entries: Vec<_> = std::fs::read_dir(outputs.join("results"))
        .unwrap()
        .collect();
    assert!(entries.is_empty());
}

/// A missing required file surfaces the path and its role.
#[test]
fn missing_required_input_names_path_and_role() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("inputs");
    std::fs::create_dir_all(&input).unwrap();
    write_settings(&input, 0.5, 1000.0, "");
    // no unit_data.csv, no demand.csv

    let err = run_opt_problem("broken", &input, tmp.path()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("unit data file"));
    assert!(message.contains("unit_data.csv"));
}

/// Demand and variable traces of different lengths are a fatal
/// data-consistency error.
#[test]
fn trace_length_mismatch_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("inputs");
    std::fs::create_dir_all(&input).unwrap();

    write_settings(&input, 0.5, 1000.0, "");
    write_units(&input, &["W1,Wind,300,1,,,1,,,,,,"]);
    write_demand(&input, &[200.0, 181.0, 100.0]);
    write_file(&input, "variable_traces.csv", "Interval,Wind\n0,1.0\n1,0.0\n");
    write_constraint_list(&input, &ALL_CONSTRAINT_IDS);

    let err = run_opt_problem("mismatch", &input, tmp.path()).unwrap_err();
    assert!(format!("{err:#}").contains("unequal"));
}

/// Full availability and full fleet count let a variable unit reach
/// nameplate output.
#[test]
fn full_trace_permits_full_variable_output() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("inputs");
    std::fs::create_dir_all(&input).unwrap();

    write_settings(&input, 0.5, 1000.0, "");
    write_units(&input, &["W1,Wind,50,4,,,1,,,,,,"]);
    write_demand(&input, &[200.0]);
    write_file(&input, "variable_traces.csv", "Interval,Wind\n0,1.0\n");
    write_constraint_list(&input, &ALL_CONSTRAINT_IDS);

    let outcome = run_pipeline("full_wind", &input, tmp.path()).unwrap();
    assert_eq!(outcome.report.status, SolveStatus::Optimal);

    let results = tmp.path().join("full_wind").join("results");
    let power = results.join("power_generated_MW.csv");
    assert!((read_cell(&power, &["0"], "W1") - 200.0).abs() < 1e-4);
    let unserved = results.join("unserved_power_MW.csv");
    assert!(read_cell(&unserved, &["0"], "unserved_power").abs() < 1e-4);
}
