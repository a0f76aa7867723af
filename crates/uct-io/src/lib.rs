//! # uct-io: File Interfaces for the Unit Commitment Toolkit
//!
//! Everything that touches the filesystem lives here: the per-problem path
//! layout, eager CSV loaders for the input tables, the relative-interval
//! initial-state codec, the constraint toggle list, and result-table
//! serialization.
//!
//! Loads are eager and strict: a missing *required* file or an unparseable
//! cell is a fatal [`IoError`] carrying the path and its role, while the
//! optional tables (variable traces, initial state) return `None` so the
//! caller can elide the associated constraints.

mod constraint_list;
mod error;
mod initial_state;
mod loaders;
mod paths;
mod results;

pub use constraint_list::load_constraint_list;
pub use error::IoError;
pub use initial_state::{load_initial_state, write_initial_state};
pub use loaders::{
    load_demand_data, load_settings, load_unit_data, load_variable_traces, write_demand_data,
    write_variable_traces,
};
pub use paths::{check_path_exists, make_results_folders, ProblemPaths};
pub use results::{read_table, write_results, write_table, TableData};
