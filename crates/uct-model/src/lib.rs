//! # uct-model: MILP Formulation for Unit Commitment
//!
//! This crate turns loaded problem data into a mixed-integer linear program
//! and drives the solver:
//!
//! - [`Var`] allocates one solver variable per tuple of the Cartesian
//!   product of its index sets, and harvests optimal values back into
//!   dimensional [`uct_core::ResultTable`]s.
//! - [`constraints`] holds the constraint library: each family is a pure
//!   function of `(sets, data, vars)` returning labeled linear
//!   (in)equalities, with labels that literally encode the index tuple
//!   (e.g. `power_lt_capacity_(i=3, u=Coal)`).
//! - [`ConstraintRegistry`] maps the closed set of family IDs to their
//!   builders and filters them through the external toggle list.
//! - [`make_objective`] assembles fuel, variable-O&M and unserved-energy
//!   cost.
//! - [`solve`] hands the problem to HiGHS once and reports status,
//!   objective and wall time; infeasible or unbounded outcomes are clean
//!   end states, not errors.
//!
//! The formulation works on *fleet rows*: `num_committed` counts machines
//! of a bundled catalog entry, so commitment variables are integers rather
//! than binaries. Boundary conditions for the first interval come from the
//! relative-indexed initial-state table, which keeps the variable count
//! independent of history depth.

mod assemble;
pub mod constraints;
mod error;
mod extract;
mod objective;
mod registry;
mod solve;
mod var;

pub use assemble::assemble_problem;
pub use error::ModelError;
pub use extract::extract_results;
pub use objective::{
    fuel_cost_term, make_objective, unserved_energy_cost_term, vom_cost_term,
};
pub use registry::{ConstraintBuilder, ConstraintId, ConstraintRegistry};
pub use solve::{solve, SolveReport, SolveStatus, SolvedUc, SolverConfig, UcProblem};
pub use var::{create_variables, UcVars, Var, VarKind};

/// Ordered labeled constraints produced by one family.
pub type LabeledConstraints = Vec<(String, good_lp::Constraint)>;
