//! Post-solve harvest of every decision variable.

use good_lp::Solution;

use uct_core::ResultTable;

use crate::var::UcVars;

/// One table per decision variable, in declaration order.
pub fn extract_results(vars: &UcVars, solution: &impl Solution) -> Vec<ResultTable> {
    vars.all().iter().map(|var| var.extract(solution)).collect()
}
