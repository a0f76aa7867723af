//! # uct-core: Unit Commitment Modeling Core
//!
//! Provides the data structures shared by the rest of the toolkit: ordered
//! index sets with subset validation, the fleet catalog and trace tables,
//! typed run settings, the relative-interval initial-state table, and the
//! dimensional result tables produced after a solve.
//!
//! ## Design Philosophy
//!
//! Unit commitment is formulated over *fleet rows*: a catalog entry stands
//! for `NumUnits` identical generators, so commitment counts are integers
//! per row rather than one binary per machine. Everything in this crate is
//! a plain in-memory table; file I/O lives in `uct-io` and the MILP algebra
//! in `uct-model`.
//!
//! ## Quick Start
//!
//! ```rust
//! use uct_core::*;
//!
//! let mut units = Set::new("units", vec![Element::label("Coal"), Element::label("Wind")]);
//! let commit = Set::subset_of("units_commit", vec![Element::label("Coal")], &mut units).unwrap();
//! assert!(commit.contains(&Element::label("Coal")));
//! ```

mod data;
mod error;
mod result_table;
mod set;
mod settings;

pub use data::{
    DemandTrace, FleetData, InitialState, Technology, UcData, UnitRecord, VariableTraces,
};
pub use error::CoreError;
pub use result_table::ResultTable;
pub use set::{Element, Set, Sets};
pub use settings::{ConstraintToggle, ReserveMode, SettingValue, Settings};
