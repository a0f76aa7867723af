//! Ordered index sets and the set bundle used by every formulation.
//!
//! A [`Set`] is a named, ordered collection of [`Element`]s. Subsets declare
//! a master at construction time and fail fast when an element is not a
//! member of it; constraint builders rely on set order for deterministic
//! labels and for adjacent-interval references (`i - 1`, `i`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{FleetData, UcData};
use crate::error::CoreError;
use crate::settings::ReserveMode;

/// One member of a [`Set`]: either a time interval or a string label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    /// A 0-based time step (negative values address the pre-horizon past).
    Interval(i64),
    /// A unit, technology or reserve-class label.
    Label(String),
}

impl Element {
    pub fn interval(i: i64) -> Self {
        Element::Interval(i)
    }

    pub fn label(name: impl Into<String>) -> Self {
        Element::Label(name.into())
    }

    /// The interval number, if this element is one.
    pub fn as_interval(&self) -> Option<i64> {
        match self {
            Element::Interval(i) => Some(*i),
            Element::Label(_) => None,
        }
    }

    /// The label text, if this element is one.
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Element::Interval(_) => None,
            Element::Label(name) => Some(name),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Interval(i) => write!(f, "{i}"),
            Element::Label(name) => write!(f, "{name}"),
        }
    }
}

/// A named, ordered index collection, optionally a subset of a master set.
#[derive(Debug, Clone)]
pub struct Set {
    name: String,
    indices: Vec<Element>,
    subsets: Vec<String>,
}

impl Set {
    pub fn new(name: impl Into<String>, indices: Vec<Element>) -> Self {
        Self {
            name: name.into(),
            indices,
            subsets: Vec::new(),
        }
    }

    /// Build a subset, validating every element against `master` and
    /// registering the subset name with it.
    pub fn subset_of(
        name: impl Into<String>,
        indices: Vec<Element>,
        master: &mut Set,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        for element in &indices {
            if !master.contains(element) {
                return Err(CoreError::SubsetValidation {
                    set: name,
                    element: element.to_string(),
                    master: master.name.clone(),
                });
            }
        }
        master.subsets.push(name.clone());
        Ok(Self {
            name,
            indices,
            subsets: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn indices(&self) -> &[Element] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, element: &Element) -> bool {
        self.indices.contains(element)
    }

    /// Names of the subsets registered against this set.
    pub fn subsets(&self) -> &[String] {
        &self.subsets
    }

    /// Iterate interval numbers; skips label elements.
    pub fn intervals(&self) -> impl Iterator<Item = i64> + '_ {
        self.indices.iter().filter_map(Element::as_interval)
    }

    /// Iterate label texts; skips interval elements.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.indices.iter().filter_map(Element::as_label)
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The full bundle of sets required by the unit commitment formulation.
#[derive(Debug, Clone)]
pub struct Sets {
    pub intervals: Set,
    pub units: Set,
    pub units_commit: Set,
    pub units_variable: Set,
    pub units_storage: Set,
    pub units_reserve: Set,
    pub reserves: Set,
}

impl Sets {
    /// Materialize the sets from loaded problem data.
    ///
    /// Technology classes drive subset membership: thermal units get
    /// commitment decisions, wind/solar follow an availability trace and
    /// storage carries an energy state. Reserve-eligible units are the
    /// storage and commitment fleets in catalog order.
    pub fn from_data(data: &UcData, reserves: ReserveMode) -> Result<Self, CoreError> {
        Self::build(&data.fleet, data.demand.intervals(), reserves)
    }

    /// As [`Sets::from_data`], with an explicit interval list.
    pub fn build(
        fleet: &FleetData,
        intervals: impl IntoIterator<Item = i64>,
        reserves: ReserveMode,
    ) -> Result<Self, CoreError> {
        let intervals = Set::new(
            "intervals",
            intervals.into_iter().map(Element::interval).collect(),
        );
        let mut units = Set::new(
            "units",
            fleet.unit_names().map(Element::label).collect(),
        );

        let labels = |names: Vec<&str>| names.into_iter().map(Element::label).collect::<Vec<_>>();

        let units_commit =
            Set::subset_of("units_commit", labels(fleet.commit_units()), &mut units)?;
        let units_variable =
            Set::subset_of("units_variable", labels(fleet.variable_units()), &mut units)?;
        let units_storage =
            Set::subset_of("units_storage", labels(fleet.storage_units()), &mut units)?;
        let units_reserve =
            Set::subset_of("units_reserve", labels(fleet.reserve_units()), &mut units)?;

        let reserves = Set::new(
            "reserves",
            reserves.classes().iter().copied().map(Element::label).collect(),
        );

        Ok(Self {
            intervals,
            units,
            units_commit,
            units_variable,
            units_storage,
            units_reserve,
            reserves,
        })
    }
}
