//! Variable-resource availability.

use good_lp::constraint;

use uct_core::{Sets, UcData};

use crate::error::ModelError;
use crate::var::UcVars;
use crate::LabeledConstraints;

use super::iu;

/// Wind and solar output is capped by the availability trace of the unit's
/// technology times the fleet rating. With no trace file loaded the family
/// emits nothing.
pub fn variable_resource_availability(
    sets: &Sets,
    data: &UcData,
    vars: &UcVars,
) -> Result<LabeledConstraints, ModelError> {
    let Some(traces) = &data.variable_traces else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for (pos, i) in sets.intervals.intervals().enumerate() {
        for u in sets.units_variable.labels() {
            let unit = data.fleet.unit(u);
            let technology = unit.technology.to_string();
            let availability = traces.availability(&technology, pos).ok_or_else(|| {
                ModelError::MissingTrace {
                    unit: u.to_string(),
                    technology: technology.clone(),
                }
            })?;
            out.push((
                format!("variable_resource_availability_(i={i}, u={u})"),
                constraint!(
                    vars.power_generated.at(&iu(i, u))
                        <= availability * unit.fleet_capacity_mw()
                ),
            ));
        }
    }
    Ok(out)
}
