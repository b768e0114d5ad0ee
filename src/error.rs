//! Errors raised while validating a problem or running the simplex method.
//!
//! Properties of the linear program itself (unbounded, infeasible, iteration
//! limit reached) are not errors: they are reported through
//! [crate::solvers::Status].

use thiserror::Error;

/// The problem handed to the solver cannot be turned into a tableau
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedInputError {
    /// The objective has no coefficients, so there is nothing to optimize
    #[error("the objective has no coefficients")]
    EmptyObjective,

    /// A constraint does not have one coefficient per decision variable
    #[error("constraint {constraint} has {found} coefficients, expected {expected}")]
    ArityMismatch {
        /// index of the offending constraint
        constraint: usize,
        /// number of decision variables in the objective
        expected: usize,
        /// number of coefficients in the constraint
        found: usize,
    },

    /// An objective coefficient is NaN or infinite
    #[error("objective coefficient {index} is not finite ({value})")]
    NonFiniteObjective {
        /// variable index
        index: usize,
        /// offending value
        value: f64,
    },

    /// A constraint coefficient is NaN or infinite
    #[error("coefficient {index} of constraint {constraint} is not finite ({value})")]
    NonFiniteCoefficient {
        /// constraint index
        constraint: usize,
        /// variable index
        index: usize,
        /// offending value
        value: f64,
    },

    /// A right-hand side is NaN or infinite
    #[error("right-hand side of constraint {constraint} is not finite ({value})")]
    NonFiniteRhs {
        /// constraint index
        constraint: usize,
        /// offending value
        value: f64,
    },
}

/// A pivot was requested on a cell whose magnitude is below the tolerance.
///
/// This means the entering/leaving selection let through a cell it should
/// have excluded.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("pivot element at row {row}, column {col} is {value}, which is numerically zero")]
pub struct DegeneratePivotError {
    /// tableau row of the pivot
    pub row: usize,
    /// tableau column of the pivot
    pub col: usize,
    /// value found in the pivot cell
    pub value: f64,
}

/// Anything that aborts a solve
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The problem failed validation; nothing was solved
    #[error("malformed input: {0}")]
    MalformedInput(#[from] MalformedInputError),

    /// Internal invariant violation in the pivot step
    #[error("degenerate pivot: {0}")]
    DegeneratePivot(#[from] DegeneratePivotError),

    /// A pivot was requested outside of the constraint rows or variable columns
    #[error("pivot cell ({row}, {col}) is outside of a tableau with {rows} rows and {cols} columns")]
    PivotOutOfBounds {
        /// requested row
        row: usize,
        /// requested column
        col: usize,
        /// number of rows, objective row included
        rows: usize,
        /// number of columns, right-hand side included
        cols: usize,
    },

    /// The solver configuration is unusable
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}
