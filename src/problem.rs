//! The linear program handed to the solver, as already-parsed numbers.
use std::cmp::Ordering;
use std::fmt;

use crate::error::MalformedInputError;
use crate::lp_format::LpObjective;

/// How the left-hand side of a constraint relates to its right-hand side
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Relation {
    /// `<=`
    LessEq,
    /// `>=`
    GreaterEq,
    /// `=`
    Equal,
}

impl Relation {
    /// The relation obtained by multiplying both sides by -1
    pub fn flipped(self) -> Relation {
        match self {
            Relation::LessEq => Relation::GreaterEq,
            Relation::GreaterEq => Relation::LessEq,
            Relation::Equal => Relation::Equal,
        }
    }
}

/// `Less` is `<=`, `Greater` is `>=`
impl From<Ordering> for Relation {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Relation::LessEq,
            Ordering::Equal => Relation::Equal,
            Ordering::Greater => Relation::GreaterEq,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::LessEq => "<=",
            Relation::GreaterEq => ">=",
            Relation::Equal => "=",
        })
    }
}

/// `coefficients · x  relation  rhs`
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    /// One coefficient per decision variable, in variable order
    pub coefficients: Vec<f64>,
    /// '<=' '=' or '>='
    pub relation: Relation,
    /// Right-hand side. May be negative, the solver normalizes it.
    pub rhs: f64,
}

impl Constraint {
    /// Build a constraint
    pub fn new(coefficients: Vec<f64>, relation: Relation, rhs: f64) -> Constraint {
        Constraint {
            coefficients,
            relation,
            rhs,
        }
    }
}

/// A linear program over non-negative decision variables `x1..xn`
#[derive(Clone, Debug, PartialEq)]
pub struct LinearProgram {
    /// Problem name, only used when rendering
    pub name: String,
    /// Whether to maximize or minimize the objective
    pub sense: LpObjective,
    /// One coefficient per decision variable
    pub objective: Vec<f64>,
    /// Constraints, in the order they were given
    pub constraints: Vec<Constraint>,
}

impl LinearProgram {
    /// A problem with the given objective and no constraints yet
    pub fn new(sense: LpObjective, objective: Vec<f64>) -> LinearProgram {
        LinearProgram {
            name: "lp_simplex_problem".to_string(),
            sense,
            objective,
            constraints: vec![],
        }
    }

    /// Rename the problem
    pub fn with_name(self, name: impl Into<String>) -> LinearProgram {
        LinearProgram {
            name: name.into(),
            ..self
        }
    }

    /// Append a constraint
    pub fn with_constraint(mut self, coefficients: Vec<f64>, relation: Relation, rhs: f64) -> LinearProgram {
        self.constraints.push(Constraint::new(coefficients, relation, rhs));
        self
    }

    /// Number of decision variables
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    /// Check arities and reject NaN or infinite numbers.
    ///
    /// ```
    /// use lp_simplex::lp_format::LpObjective;
    /// use lp_simplex::problem::{LinearProgram, Relation};
    ///
    /// let lp = LinearProgram::new(LpObjective::Maximize, vec![1., 2.])
    ///     .with_constraint(vec![1.], Relation::LessEq, 4.);
    /// assert!(lp.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), MalformedInputError> {
        if self.objective.is_empty() {
            return Err(MalformedInputError::EmptyObjective);
        }
        if let Some((index, &value)) = self.objective.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(MalformedInputError::NonFiniteObjective { index, value });
        }
        let expected = self.num_variables();
        for (idx, constraint) in self.constraints.iter().enumerate() {
            if constraint.coefficients.len() != expected {
                return Err(MalformedInputError::ArityMismatch {
                    constraint: idx,
                    expected,
                    found: constraint.coefficients.len(),
                });
            }
            if let Some((index, &value)) = constraint
                .coefficients
                .iter()
                .enumerate()
                .find(|(_, v)| !v.is_finite())
            {
                return Err(MalformedInputError::NonFiniteCoefficient {
                    constraint: idx,
                    index,
                    value,
                });
            }
            if !constraint.rhs.is_finite() {
                return Err(MalformedInputError::NonFiniteRhs {
                    constraint: idx,
                    value: constraint.rhs,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_vars() -> LinearProgram {
        LinearProgram::new(LpObjective::Maximize, vec![3., 2.])
    }

    #[test]
    fn accepts_well_formed_problem() {
        let lp = two_vars()
            .with_constraint(vec![1., 1.], Relation::LessEq, 4.)
            .with_constraint(vec![1., 3.], Relation::GreaterEq, -6.);
        assert_eq!(lp.validate(), Ok(()));
    }

    #[test]
    fn rejects_arity_mismatch() {
        let lp = two_vars()
            .with_constraint(vec![1., 1.], Relation::LessEq, 4.)
            .with_constraint(vec![1., 3., 5.], Relation::LessEq, 6.);
        assert_eq!(
            lp.validate(),
            Err(MalformedInputError::ArityMismatch {
                constraint: 1,
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn rejects_non_finite_numbers() {
        let lp = LinearProgram::new(LpObjective::Minimize, vec![1., f64::INFINITY]);
        assert!(matches!(
            lp.validate(),
            Err(MalformedInputError::NonFiniteObjective { index: 1, .. })
        ));

        let lp = two_vars().with_constraint(vec![f64::NAN, 1.], Relation::Equal, 1.);
        assert!(matches!(
            lp.validate(),
            Err(MalformedInputError::NonFiniteCoefficient { constraint: 0, index: 0, .. })
        ));

        let lp = two_vars().with_constraint(vec![1., 1.], Relation::Equal, f64::NEG_INFINITY);
        assert!(matches!(
            lp.validate(),
            Err(MalformedInputError::NonFiniteRhs { constraint: 0, .. })
        ));
    }

    #[test]
    fn rejects_empty_objective() {
        let lp = LinearProgram::new(LpObjective::Maximize, vec![]);
        assert_eq!(lp.validate(), Err(MalformedInputError::EmptyObjective));
    }

    #[test]
    fn relation_from_ordering_and_flip() {
        assert_eq!(Relation::from(Ordering::Less), Relation::LessEq);
        assert_eq!(Relation::from(Ordering::Greater), Relation::GreaterEq);
        assert_eq!(Relation::LessEq.flipped(), Relation::GreaterEq);
        assert_eq!(Relation::Equal.flipped(), Relation::Equal);
    }
}
