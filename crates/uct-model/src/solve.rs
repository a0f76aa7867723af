//! Solver driver: one blocking HiGHS call per assembled problem.

use std::fmt;
use std::time::Instant;

use good_lp::solvers::highs::highs;
use good_lp::{Expression, ProblemVariables, ResolutionError, Solution, SolverModel};
use serde::Serialize;
use tracing::{info, warn};

use uct_core::ResultTable;

use crate::extract::extract_results;
use crate::var::UcVars;
use crate::LabeledConstraints;

/// Opaque solver options, passed through to HiGHS.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Wall-clock limit in seconds; `None` lets the solver run to proven
    /// optimality.
    pub time_limit_seconds: Option<f64>,
}

/// Outcome of the solver call. Non-optimal outcomes are clean end states:
/// the driver reports them and writes no results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    Error(String),
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Unbounded => write!(f, "Unbounded"),
            SolveStatus::Error(message) => write!(f, "Error: {message}"),
        }
    }
}

/// What the solver reported for one problem.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub name: String,
    pub status: SolveStatus,
    /// Present only for an optimal solve.
    pub objective_value: Option<f64>,
    pub solve_time_ms: u128,
    pub num_variables: usize,
    pub num_constraints: usize,
}

impl SolveReport {
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

/// The assembled problem, ready for a single solver call.
pub struct UcProblem {
    pub name: String,
    pub variables: ProblemVariables,
    pub vars: UcVars,
    pub constraints: LabeledConstraints,
    pub objective: Expression,
}

/// A solved problem: the report plus, when optimal, one result table per
/// decision variable.
pub struct SolvedUc {
    pub report: SolveReport,
    pub tables: Option<Vec<ResultTable>>,
}

/// Hand the problem to HiGHS. Constraints are attached in the order they
/// were built (registry order, then natural index order), so two runs over
/// identical inputs produce identical problem files.
pub fn solve(problem: UcProblem, config: &SolverConfig) -> SolvedUc {
    let UcProblem {
        name,
        variables,
        vars,
        constraints,
        objective,
    } = problem;

    let num_variables = vars.len();
    let num_constraints = constraints.len();
    info!(
        name = %name,
        variables = num_variables,
        constraints = num_constraints,
        "solving unit commitment MILP"
    );

    let start = Instant::now();
    let mut model = variables.minimise(objective.clone()).using(highs);
    if let Some(limit) = config.time_limit_seconds {
        model = model.set_time_limit(limit);
    }
    for (_, constraint) in constraints {
        model.add_constraint(constraint);
    }

    let outcome = model.solve();
    let solve_time_ms = start.elapsed().as_millis();

    let (status, objective_value, tables) = match outcome {
        Ok(solution) => {
            let objective_value = solution.eval(objective);
            let tables = extract_results(&vars, &solution);
            (SolveStatus::Optimal, Some(objective_value), Some(tables))
        }
        Err(ResolutionError::Infeasible) => (SolveStatus::Infeasible, None, None),
        Err(ResolutionError::Unbounded) => (SolveStatus::Unbounded, None, None),
        Err(other) => (SolveStatus::Error(other.to_string()), None, None),
    };

    match &status {
        SolveStatus::Optimal => info!(
            name = %name,
            objective = objective_value.unwrap_or_default(),
            solve_time_ms,
            "solve complete"
        ),
        other => warn!(name = %name, status = %other, solve_time_ms, "solve ended without an optimum"),
    }

    SolvedUc {
        report: SolveReport {
            name,
            status,
            objective_value,
            solve_time_ms,
            num_variables,
            num_constraints,
        },
        tables,
    }
}
