//! This module provides the solver interface and the tableau simplex method.
//!
//! The usual entry point is [solve], or a [SimplexSolver] configured through
//! the builder-style [WithMaxIterations] and [WithTolerance] traits:
//!
//! ```
//! use lp_simplex::lp_format::LpObjective;
//! use lp_simplex::problem::{LinearProgram, Relation};
//! use lp_simplex::solvers::{PivotRule, SimplexSolver, SolverTrait, Status, WithMaxIterations};
//!
//! let lp = LinearProgram::new(LpObjective::Maximize, vec![1., 1.])
//!     .with_constraint(vec![1., 2.], Relation::LessEq, 4.);
//! let solver = SimplexSolver::new()
//!     .with_pivot_rule(PivotRule::Bland)
//!     .with_max_iterations(100);
//! let solution = solver.run(&lp).unwrap();
//! assert_eq!(solution.status, Status::Optimal);
//! assert_eq!(solution.objective_value, Some(4.));
//! ```
//!
//! Unbounded, infeasible and iteration-limited problems are not errors: they
//! come back as a [Solution] with the matching [Status]. Errors are reserved
//! for malformed input and broken solver invariants.

use std::collections::BTreeMap;

use crate::error::SolveError;
use crate::problem::LinearProgram;
use crate::tableau::Tableau;
use crate::util::DEFAULT_TOLERANCE;

pub use self::pivot_rule::PivotRule;
pub use self::simplex::*;

pub mod pivot_rule;
pub mod simplex;

/// The default iteration cap is this factor times the number of tableau cells
pub const DEFAULT_ITERATION_FACTOR: usize = 10;

/// Terminal outcome of a solve
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Status {
    /// An optimal basic solution was found
    Optimal,
    /// The objective can grow without bound
    Unbounded,
    /// No point satisfies every constraint
    Infeasible,
    /// The iteration cap was reached before any other terminal state
    IterationLimitExceeded,
}

/// Result of a solve
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Terminal status
    pub status: Status,
    /// Value of every decision variable, by index. Empty unless optimal.
    pub variable_values: BTreeMap<usize, f64>,
    /// Objective value in the original sense. Only set when optimal.
    pub objective_value: Option<f64>,
    /// Number of pivots performed
    pub iterations: usize,
}

impl Solution {
    /// An optimal solution
    pub fn new(variable_values: BTreeMap<usize, f64>, objective_value: f64, iterations: usize) -> Solution {
        Solution {
            status: Status::Optimal,
            variable_values,
            objective_value: Some(objective_value),
            iterations,
        }
    }

    /// A non-optimal outcome, which carries no values
    pub fn without_values(status: Status, iterations: usize) -> Solution {
        Solution {
            status,
            variable_values: BTreeMap::new(),
            objective_value: None,
            iterations,
        }
    }

    /// Value of the decision variable `index`, if the solve was optimal
    pub fn value(&self, index: usize) -> Option<f64> {
        self.variable_values.get(&index).copied()
    }

    /// Values of all decision variables, in index order
    pub fn values(&self) -> Vec<f64> {
        self.variable_values.values().copied().collect()
    }

    /// Shorthand for `status == Status::Optimal`
    pub fn is_optimal(&self) -> bool {
        self.status == Status::Optimal
    }
}

/// Knobs of the simplex method
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Magnitude under which a number counts as zero
    pub tolerance: f64,
    /// Entering column selection
    pub pivot_rule: PivotRule,
    /// Maximum number of pivots over both phases.
    /// `None` means [DEFAULT_ITERATION_FACTOR] times the tableau size.
    pub max_iterations: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance: DEFAULT_TOLERANCE,
            pivot_rule: PivotRule::default(),
            max_iterations: None,
        }
    }
}

impl SolverConfig {
    /// Reject tolerances that are not small positive numbers, and a zero cap
    pub fn validate(&self) -> Result<(), SolveError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SolveError::InvalidConfig(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == Some(0) {
            return Err(SolveError::InvalidConfig(
                "the iteration cap must allow at least one pivot".to_string(),
            ));
        }
        Ok(())
    }

    /// Iteration cap for a given initial tableau
    pub fn iteration_cap(&self, tableau: &Tableau) -> usize {
        self.max_iterations.unwrap_or_else(|| {
            DEFAULT_ITERATION_FACTOR * tableau.num_rows() * (tableau.num_variables() + 1)
        })
    }
}

/// Something that can solve a [LinearProgram]
pub trait SolverTrait {
    /// Solve `problem`; LP outcomes are reported through [Solution::status]
    fn run(&self, problem: &LinearProgram) -> Result<Solution, SolveError>;
}

/// Solvers with a configurable iteration cap
pub trait WithMaxIterations<T> {
    /// Current cap, `None` for the size-based default
    fn max_iterations(&self) -> Option<usize>;
    /// Copy of the solver with the given cap
    fn with_max_iterations(&self, iterations: usize) -> T;
}

/// Solvers with a configurable numerical tolerance
pub trait WithTolerance<T> {
    /// Current tolerance
    fn tolerance(&self) -> f64;
    /// Copy of the solver with the given tolerance
    fn with_tolerance(&self, tolerance: f64) -> T;
}

/// Solve `problem` with the given configuration
pub fn solve(problem: &LinearProgram, config: &SolverConfig) -> Result<Solution, SolveError> {
    SimplexSolver::with_config(*config).run(problem)
}
