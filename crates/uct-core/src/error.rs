use thiserror::Error;

/// Errors raised while assembling the in-memory data model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A subset element was not found in its master set.
    #[error("member of set {set} ({element}) is not a member of the master set {master}")]
    SubsetValidation {
        set: String,
        element: String,
        master: String,
    },

    /// Demand and variable traces must cover the same intervals.
    #[error("length of demand trace ({demand}) and variable traces ({traces}) are unequal")]
    TraceLengthMismatch { demand: usize, traces: usize },

    /// A variable unit's technology has no column in the variable traces.
    #[error("technology {technology} (unit {unit}) not found in the variable traces")]
    MissingTrace { unit: String, technology: String },

    /// A required setting was absent or carried the wrong type.
    #[error("setting {key}: {problem}")]
    BadSetting { key: String, problem: String },
}
