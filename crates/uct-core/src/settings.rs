//! Typed run settings and the constraint toggle list.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which reserve classes the problem carries.
///
/// Reserves are scaffolding in the current formulation: the option only
/// decides the contents of the `reserves` set (and thereby the shape of the
/// `reserve_enabled` variable). Unrecognized values collapse to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReserveMode {
    #[default]
    None,
    RaiseAndLower,
}

impl ReserveMode {
    pub fn classes(&self) -> &'static [&'static str] {
        match self {
            ReserveMode::None => &[],
            ReserveMode::RaiseAndLower => &["raise", "lower"],
        }
    }
}

impl FromStr for ReserveMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "RaiseAndLower" => ReserveMode::RaiseAndLower,
            _ => ReserveMode::None,
        })
    }
}

/// A single decoded `Parameter,Type,Value` row.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl SettingValue {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(v) => Some(*v),
            SettingValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

/// The validated settings table.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub interval_duration_hrs: f64,
    pub value_of_lost_load_per_mwh: f64,
    pub reserves: ReserveMode,
    /// Days folded into one solve in series mode; absent outside it.
    pub days_per_solve: Option<i64>,
}

impl Settings {
    /// Pull the required scalars out of the decoded rows.
    pub fn from_values(values: &IndexMap<String, SettingValue>) -> Result<Self, CoreError> {
        let float = |key: &str| -> Result<f64, CoreError> {
            values
                .get(key)
                .and_then(SettingValue::as_float)
                .ok_or_else(|| CoreError::BadSetting {
                    key: key.to_string(),
                    problem: "missing or not a float".to_string(),
                })
        };

        let reserves = values
            .get("reserves")
            .and_then(SettingValue::as_str)
            .map_or(ReserveMode::None, |s| {
                s.parse().unwrap_or(ReserveMode::None)
            });

        Ok(Settings {
            interval_duration_hrs: float("IntervalDurationHrs")?,
            value_of_lost_load_per_mwh: float("ValueOfLostLoad$/MWh")?,
            reserves,
            days_per_solve: values.get("DaysPerSolve").and_then(SettingValue::as_int),
        })
    }
}

/// One row of `constraint_list.csv`, after boolean normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintToggle {
    pub id: String,
    pub include: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_settings_extract() {
        let values = IndexMap::from([
            (
                "IntervalDurationHrs".to_string(),
                SettingValue::Float(0.5),
            ),
            (
                "ValueOfLostLoad$/MWh".to_string(),
                SettingValue::Float(1000.0),
            ),
            (
                "reserves".to_string(),
                SettingValue::Str("RaiseAndLower".to_string()),
            ),
        ]);
        let settings = Settings::from_values(&values).unwrap();
        assert_eq!(settings.interval_duration_hrs, 0.5);
        assert_eq!(settings.value_of_lost_load_per_mwh, 1000.0);
        assert_eq!(settings.reserves, ReserveMode::RaiseAndLower);
        assert_eq!(settings.days_per_solve, None);
    }

    #[test]
    fn missing_required_setting_is_an_error() {
        let values = IndexMap::from([(
            "IntervalDurationHrs".to_string(),
            SettingValue::Float(1.0),
        )]);
        let err = Settings::from_values(&values).unwrap_err();
        assert!(err.to_string().contains("ValueOfLostLoad$/MWh"));
    }

    #[test]
    fn unknown_reserve_option_means_no_reserves() {
        let values = IndexMap::from([
            ("IntervalDurationHrs".to_string(), SettingValue::Float(1.0)),
            (
                "ValueOfLostLoad$/MWh".to_string(),
                SettingValue::Float(500.0),
            ),
            (
                "reserves".to_string(),
                SettingValue::Str("Spinning".to_string()),
            ),
        ]);
        let settings = Settings::from_values(&values).unwrap();
        assert_eq!(settings.reserves, ReserveMode::None);
        assert!(settings.reserves.classes().is_empty());
    }
}
