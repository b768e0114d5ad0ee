//! Dense simplex tableau with basis bookkeeping.
//!
//! Row 0 is the objective row, rows `1..=m` are constraint rows and the last
//! column is the right-hand side. Row 0 stores `z_j - c_j` for a maximization
//! objective, so its right-hand side cell is the current objective value.
use std::fmt;

use crate::error::SolveError;
use crate::pivot;
use crate::util::{clean, is_negative, is_zero};

/// Role of a column in the standard form
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum VariableKind {
    /// A variable of the original problem
    Decision,
    /// `+1` column added to a `<=` constraint
    Slack,
    /// `-1` column added to a `>=` constraint
    Surplus,
    /// `+1` column giving a `>=` or `=` constraint an initial basic variable
    Artificial,
}

/// A column of the tableau. Its identity is its index, which never changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    /// Column index
    pub index: usize,
    /// Role of the variable
    pub kind: VariableKind,
    /// Whether the variable is currently basic
    pub basic: bool,
    /// Display name: `x`, `s`, `e` or `a` followed by a 1-based number
    pub name: String,
}

/// The simplex tableau
#[derive(Clone, Debug, PartialEq)]
pub struct Tableau {
    rows: Vec<Vec<f64>>,
    basis: Vec<usize>,
    kinds: Vec<VariableKind>,
    names: Vec<String>,
}

impl Tableau {
    /// `rows` has `m + 1` rows of `kinds.len() + 1` values, `basis` has `m` entries
    pub(crate) fn new(
        rows: Vec<Vec<f64>>,
        basis: Vec<usize>,
        kinds: Vec<VariableKind>,
        names: Vec<String>,
    ) -> Tableau {
        debug_assert_eq!(rows.len(), basis.len() + 1);
        debug_assert!(rows.iter().all(|r| r.len() == kinds.len() + 1));
        debug_assert_eq!(kinds.len(), names.len());
        Tableau {
            rows,
            basis,
            kinds,
            names,
        }
    }

    /// Number of rows, objective row included
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of constraint rows
    pub fn num_constraints(&self) -> usize {
        self.basis.len()
    }

    /// Number of variable columns, right-hand side excluded
    pub fn num_variables(&self) -> usize {
        self.kinds.len()
    }

    /// Index of the right-hand side column
    pub fn rhs_index(&self) -> usize {
        self.kinds.len()
    }

    /// Value of a cell. Panics if the cell is outside of the tableau.
    pub fn value_at(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// Row 0 without its right-hand side
    pub fn objective_row(&self) -> &[f64] {
        &self.rows[0][..self.rhs_index()]
    }

    /// Reduced costs `c_j - z_j`; all of them are `<= 0` at an optimum
    pub fn reduced_costs(&self) -> Vec<f64> {
        self.objective_row().iter().map(|v| -v).collect()
    }

    /// Right-hand side of every row, objective row first
    pub fn rhs_column(&self) -> Vec<f64> {
        let rhs = self.rhs_index();
        self.rows.iter().map(|r| r[rhs]).collect()
    }

    /// Current value of the row 0 objective
    pub fn objective_value(&self) -> f64 {
        self.rows[0][self.rhs_index()]
    }

    /// Column basic in constraint row `row` (`1..=m`)
    pub fn basis_variable_for(&self, row: usize) -> Option<usize> {
        row.checked_sub(1).and_then(|r| self.basis.get(r)).copied()
    }

    /// Constraint row in which `col` is basic
    pub fn basic_row_of(&self, col: usize) -> Option<usize> {
        self.basis.iter().position(|&b| b == col).map(|r| r + 1)
    }

    /// Role of every column
    pub fn kinds(&self) -> &[VariableKind] {
        &self.kinds
    }

    /// Display name of a column
    pub fn name_of(&self, col: usize) -> &str {
        &self.names[col]
    }

    /// Variable catalog in column order, with the current basis status
    pub fn variables(&self) -> Vec<Variable> {
        self.kinds
            .iter()
            .zip(self.names.iter())
            .enumerate()
            .map(|(index, (&kind, name))| Variable {
                index,
                kind,
                basic: self.basis.contains(&index),
                name: name.clone(),
            })
            .collect()
    }

    /// Pivot on `(row, col)`; see [crate::pivot::eliminate]
    pub fn pivot(&mut self, row: usize, col: usize, tolerance: f64) -> Result<(), SolveError> {
        if row == 0 || row >= self.num_rows() || col >= self.num_variables() {
            return Err(SolveError::PivotOutOfBounds {
                row,
                col,
                rows: self.num_rows(),
                cols: self.num_variables() + 1,
            });
        }
        pivot::eliminate(&mut self.rows, &mut self.basis, row, col, tolerance)?;
        Ok(())
    }

    /// Replace row 0 with the maximization objective `costs · x`, then price
    /// out the basic columns so they read zero in row 0.
    ///
    /// Columns past `costs.len()` get a zero cost.
    pub(crate) fn install_objective(&mut self, costs: &[f64]) {
        let rhs = self.rhs_index();
        let mut objective = vec![0.0; rhs + 1];
        for (cell, &c) in objective.iter_mut().zip(costs.iter()) {
            *cell = -c;
        }
        for (r, &b) in self.basis.iter().enumerate() {
            let factor = objective[b];
            if factor == 0.0 {
                continue;
            }
            for (cell, &v) in objective.iter_mut().zip(self.rows[r + 1].iter()) {
                *cell -= factor * v;
            }
            objective[b] = 0.0;
        }
        self.rows[0] = objective;
    }

    /// Columns named by the basis form an identity sub-matrix across all rows
    pub fn basis_is_identity(&self, tolerance: f64) -> bool {
        self.basis.iter().enumerate().all(|(r, &col)| {
            self.rows.iter().enumerate().all(|(i, row)| {
                let expected = if i == r + 1 { 1.0 } else { 0.0 };
                is_zero(row[col] - expected, tolerance)
            })
        })
    }

    /// Every constraint right-hand side is `>= -tolerance`
    pub fn is_primal_feasible(&self, tolerance: f64) -> bool {
        let rhs = self.rhs_index();
        self.rows[1..].iter().all(|r| !is_negative(r[rhs], tolerance))
    }

    /// Values of the first `count` columns in the current basic solution
    pub fn basic_solution(&self, count: usize, tolerance: f64) -> Vec<f64> {
        let rhs = self.rhs_index();
        let mut values = vec![0.0; count];
        for (r, &col) in self.basis.iter().enumerate() {
            if col < count {
                values[col] = clean(self.rows[r + 1][rhs], tolerance);
            }
        }
        values
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "basis")?;
        for name in &self.names {
            write!(f, "\t{}", name)?;
        }
        writeln!(f, "\trhs")?;
        for (i, row) in self.rows.iter().enumerate() {
            match self.basis_variable_for(i) {
                Some(col) => write!(f, "{}", self.names[col])?,
                None => write!(f, "z")?,
            }
            for value in row {
                write!(f, "\t{}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
