//! Decision variables indexed by set tuples.

use good_lp::{variable, ProblemVariables, Solution, Variable};
use indexmap::IndexMap;

use uct_core::{Element, ResultTable, Set, Sets};

/// Variable domain handed to the solver. Everything is lower-bounded at 0;
/// direction (charge vs discharge, startup vs shutdown) is encoded by which
/// variable is used, never by sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Continuous,
    Integer,
    Binary,
}

impl VarKind {
    fn is_integral(self) -> bool {
        matches!(self, VarKind::Integer | VarKind::Binary)
    }
}

/// A decision variable spanning the Cartesian product of its index sets.
///
/// The index tuple flattens left to right: a variable over
/// `(intervals, units)` is keyed `[Interval(i), Label(u)]`, and iteration
/// follows set order, so constraint labels and result rows are
/// deterministic across runs. A tuple exists only for subset members;
/// looking up anything else is a formulation bug.
pub struct Var {
    name: String,
    units: String,
    kind: VarKind,
    sets: Vec<(String, Vec<Element>)>,
    entries: IndexMap<Vec<Element>, Variable>,
}

impl Var {
    pub fn new(
        pv: &mut ProblemVariables,
        name: impl Into<String>,
        units: impl Into<String>,
        sets: &[&Set],
        kind: VarKind,
    ) -> Self {
        let name = name.into();
        let set_index: Vec<(String, Vec<Element>)> = sets
            .iter()
            .map(|s| (s.name().to_string(), s.indices().to_vec()))
            .collect();

        let element_lists: Vec<&[Element]> =
            set_index.iter().map(|(_, e)| e.as_slice()).collect();

        let mut entries = IndexMap::new();
        for key in cartesian(&element_lists) {
            let tuple = key
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let definition = match kind {
                VarKind::Continuous => variable().min(0.0),
                VarKind::Integer => variable().integer().min(0.0),
                VarKind::Binary => variable().binary(),
            };
            let solver_var = pv.add(definition.name(format!("{name}({tuple})")));
            entries.insert(key, solver_var);
        }

        Self {
            name,
            units: units.into(),
            kind,
            sets: set_index,
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }

    /// Number of indexing sets (1 to 4).
    pub fn dims(&self) -> usize {
        self.sets.len()
    }

    /// Number of allocated solver variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &[Element]) -> Option<Variable> {
        self.entries.get(key).copied()
    }

    /// The solver variable for `key`; constraint builders only index over
    /// declared set members, so an absent tuple is a bug.
    pub fn at(&self, key: &[Element]) -> Variable {
        *self
            .entries
            .get(key)
            .expect("no variable allocated for the given index tuple")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Vec<Element>, Variable)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Harvest optimal values into the dimensional table layout: the last
    /// set spans the columns (1-D tables get a single column named after
    /// the variable) and the leading sets form the row index.
    pub fn extract(&self, solution: &impl Solution) -> ResultTable {
        let dims = self.sets.len();
        let (row_sets, column_set) = match dims {
            1 => (&self.sets[..1], None),
            _ => (&self.sets[..dims - 1], Some(&self.sets[dims - 1])),
        };

        let index_names: Vec<String> = row_sets.iter().map(|(n, _)| n.clone()).collect();
        let columns: Vec<String> = match column_set {
            Some((_, elements)) => elements.iter().map(ToString::to_string).collect(),
            None => vec![self.name.clone()],
        };

        let row_elements: Vec<&[Element]> =
            row_sets.iter().map(|(_, e)| e.as_slice()).collect();

        let mut rows = Vec::new();
        for row_key in cartesian(&row_elements) {
            let values = match column_set {
                Some((_, elements)) => elements
                    .iter()
                    .map(|column| {
                        let mut key = row_key.clone();
                        key.push(column.clone());
                        solution.value(self.at(&key))
                    })
                    .collect(),
                None => vec![solution.value(self.at(&row_key))],
            };
            rows.push((row_key, values));
        }

        ResultTable::new(
            self.name.clone(),
            self.units.clone(),
            index_names,
            columns,
            rows,
            self.kind.is_integral(),
        )
    }
}

/// Left-to-right Cartesian product of element lists. Any empty list yields
/// an empty product.
fn cartesian(sets: &[&[Element]]) -> Vec<Vec<Element>> {
    let mut keys: Vec<Vec<Element>> = vec![Vec::new()];
    for elements in sets {
        let mut next = Vec::with_capacity(keys.len() * elements.len());
        for key in &keys {
            for element in *elements {
                let mut grown = key.clone();
                grown.push(element.clone());
                next.push(grown);
            }
        }
        keys = next;
    }
    keys
}

/// The full variable block of one problem.
pub struct UcVars {
    pub power_generated: Var,
    pub power_charged: Var,
    pub stored_energy: Var,
    pub num_committed: Var,
    pub num_starting_up: Var,
    pub num_shutting_down: Var,
    pub unserved_power: Var,
    pub reserve_enabled: Var,
}

impl UcVars {
    /// Total solver variables allocated.
    pub fn len(&self) -> usize {
        self.all().iter().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All variables, in extraction order.
    pub fn all(&self) -> [&Var; 8] {
        [
            &self.power_generated,
            &self.power_charged,
            &self.stored_energy,
            &self.num_committed,
            &self.num_starting_up,
            &self.num_shutting_down,
            &self.unserved_power,
            &self.reserve_enabled,
        ]
    }
}

/// Materialize every decision variable for the given sets.
///
/// Commitment counters exist only over `units_commit`, charging and energy
/// state only over `units_storage`; constraints must never reference a
/// tuple outside those subsets.
pub fn create_variables(pv: &mut ProblemVariables, sets: &Sets) -> UcVars {
    UcVars {
        power_generated: Var::new(
            pv,
            "power_generated",
            "MW",
            &[&sets.intervals, &sets.units],
            VarKind::Continuous,
        ),
        power_charged: Var::new(
            pv,
            "power_charged",
            "MW",
            &[&sets.intervals, &sets.units_storage],
            VarKind::Continuous,
        ),
        stored_energy: Var::new(
            pv,
            "stored_energy",
            "MWh",
            &[&sets.intervals, &sets.units_storage],
            VarKind::Continuous,
        ),
        num_committed: Var::new(
            pv,
            "num_committed",
            "#Units",
            &[&sets.intervals, &sets.units_commit],
            VarKind::Integer,
        ),
        num_starting_up: Var::new(
            pv,
            "num_starting_up",
            "#Units",
            &[&sets.intervals, &sets.units_commit],
            VarKind::Integer,
        ),
        num_shutting_down: Var::new(
            pv,
            "num_shutting_down",
            "#Units",
            &[&sets.intervals, &sets.units_commit],
            VarKind::Integer,
        ),
        unserved_power: Var::new(
            pv,
            "unserved_power",
            "MW",
            &[&sets.intervals],
            VarKind::Continuous,
        ),
        reserve_enabled: Var::new(
            pv,
            "reserve_enabled",
            "MW",
            &[&sets.intervals, &sets.units_reserve, &sets.reserves],
            VarKind::Continuous,
        ),
    }
}
