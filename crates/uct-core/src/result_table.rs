//! Tabular form of a solved decision variable.
//!
//! The extractors in `uct-model` flatten a variable's optimal values into
//! one of these tables; `uct-io` serializes them. A 1-dimensional variable
//! becomes a single value column named after the variable; for higher
//! dimensions the last set spans the columns and the leading sets form the
//! row index (a MultiIndex-style layout for 3 and 4 dimensions).

use crate::set::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    name: String,
    units: String,
    /// Set names forming the row index, left to right.
    index_names: Vec<String>,
    /// Column headers after the index columns.
    columns: Vec<String>,
    rows: Vec<(Vec<Element>, Vec<f64>)>,
    /// Integer and binary variables serialize without a fractional part.
    integral: bool,
}

impl ResultTable {
    pub fn new(
        name: impl Into<String>,
        units: impl Into<String>,
        index_names: Vec<String>,
        columns: Vec<String>,
        rows: Vec<(Vec<Element>, Vec<f64>)>,
        integral: bool,
    ) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            index_names,
            columns,
            rows,
            integral,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    /// Output file name, `<name>_<units>.csv`.
    pub fn filename(&self) -> String {
        format!("{}_{}.csv", self.name, self.units)
    }

    pub fn index_names(&self) -> &[String] {
        &self.index_names
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[(Vec<Element>, Vec<f64>)] {
        &self.rows
    }

    pub fn integral(&self) -> bool {
        self.integral
    }

    /// Look up one cell by its full row key and column header.
    pub fn value(&self, key: &[Element], column: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, values)| values[col])
    }
}
