//! One-call problem assembly for the drivers.

use uct_core::{ConstraintToggle, Sets, UcData};

use crate::error::ModelError;
use crate::objective::make_objective;
use crate::registry::ConstraintRegistry;
use crate::solve::UcProblem;
use crate::var::create_variables;

/// Materialize variables, build the toggled constraint families and the
/// objective, and package them for the solver.
pub fn assemble_problem(
    name: &str,
    sets: &Sets,
    data: &UcData,
    toggles: &[ConstraintToggle],
) -> Result<UcProblem, ModelError> {
    let mut variables = good_lp::variables!();
    let vars = create_variables(&mut variables, sets);

    let registry = ConstraintRegistry::builtin();
    let selected = registry.select(toggles)?;
    let constraints = ConstraintRegistry::build(&selected, sets, data, &vars)?;
    let objective = make_objective(sets, data, &vars);

    Ok(UcProblem {
        name: name.to_string(),
        variables,
        vars,
        constraints,
        objective,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::test_fixture::data;
    use uct_core::ReserveMode;

    #[test]
    fn assembly_filters_families_through_the_toggles() {
        let data = data();
        let sets = Sets::from_data(&data, ReserveMode::None).unwrap();
        let toggles = vec![
            ConstraintToggle {
                id: "Supply==Demand".to_string(),
                include: true,
            },
            ConstraintToggle {
                id: "RampRateUp".to_string(),
                include: false,
            },
        ];
        let problem = assemble_problem("fixture", &sets, &data, &toggles).unwrap();
        assert_eq!(problem.constraints.len(), 3);
        // variable allocation is independent of the mask
        assert!(problem.vars.len() > 0);
    }
}
