use thiserror::Error;

/// Errors raised while assembling the MILP.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The toggle list referenced an ID outside the built-in family set.
    #[error("unknown constraint ID {id:?} in the constraint list")]
    UnknownConstraintId { id: String },

    /// A variable unit's technology has no availability trace column.
    #[error("technology {technology} (unit {unit}) not found in the variable traces")]
    MissingTrace { unit: String, technology: String },
}
