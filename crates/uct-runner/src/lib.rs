//! # uct-runner: Problem Orchestration
//!
//! Wires `uct-io` and `uct-model` into the two entry points:
//!
//! - [`run_opt_problem`]: the single-shot pipeline: build paths, load
//!   settings and data, materialize sets and variables, select and attach
//!   constraints, add the objective, solve once and serialize results.
//! - [`run_series_problem`]: the rolling-horizon driver that chops a long
//!   trace into day-sized chunks, solves them in sequence and threads each
//!   chunk's final state into the next chunk's initial-state table.

mod pipeline;
mod series;

pub use pipeline::{run_opt_problem, run_pipeline, PipelineOutcome};
pub use series::{run_series_problem, SeriesSummary};
