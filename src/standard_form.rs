//! Conversion of a [LinearProgram] into an initial tableau.
//!
//! Every constraint becomes an equality with a non-negative right-hand side:
//!
//! | relation | added columns                      | initial basic |
//! |----------|------------------------------------|---------------|
//! | `<=`     | slack `+1`                         | slack         |
//! | `>=`     | surplus `-1`, artificial `+1`      | artificial    |
//! | `=`      | artificial `+1`                    | artificial    |
//!
//! Columns are ordered decision variables, then slack/surplus, then
//! artificial variables. The objective is always maximized internally.
use log::debug;

use crate::error::MalformedInputError;
use crate::lp_format::{variable_name, LpObjective};
use crate::problem::{LinearProgram, Relation};
use crate::tableau::{Tableau, VariableKind};

/// A problem in standard form, ready for the two-phase simplex method
#[derive(Clone, Debug, PartialEq)]
pub struct StandardForm {
    /// Initial tableau. Row 0 is left empty until a phase installs its objective.
    pub tableau: Tableau,
    /// Number of decision variables
    pub num_decision: usize,
    /// Index of the first artificial column (the number of columns if there are none)
    pub first_artificial: usize,
    /// Objective to maximize, one coefficient per decision variable
    pub costs: Vec<f64>,
    /// The original problem minimizes, so the objective value must be negated back
    pub negated: bool,
}

impl StandardForm {
    /// Validate `problem` and build its standard form
    pub fn build(problem: &LinearProgram) -> Result<StandardForm, MalformedInputError> {
        problem.validate()?;

        let n = problem.num_variables();
        let normalized: Vec<(Vec<f64>, Relation, f64)> = problem
            .constraints
            .iter()
            .map(|c| {
                if c.rhs < 0.0 {
                    let coefficients = c.coefficients.iter().map(|a| -a).collect();
                    (coefficients, c.relation.flipped(), -c.rhs)
                } else {
                    (c.coefficients.clone(), c.relation, c.rhs)
                }
            })
            .collect();

        let num_slack = normalized.iter().filter(|(_, rel, _)| *rel != Relation::Equal).count();
        let num_artificial = normalized.iter().filter(|(_, rel, _)| *rel != Relation::LessEq).count();
        let first_artificial = n + num_slack;
        let num_columns = first_artificial + num_artificial;

        let mut kinds = vec![VariableKind::Decision; n];
        let mut names: Vec<String> = (0..n).map(variable_name).collect();
        kinds.resize(num_columns, VariableKind::Artificial);
        names.resize(num_columns, String::new());

        let mut rows = vec![vec![0.0; num_columns + 1]; normalized.len() + 1];
        let mut basis = Vec::with_capacity(normalized.len());
        let mut next_slack = n;
        let mut next_artificial = first_artificial;

        for (idx, (coefficients, relation, rhs)) in normalized.into_iter().enumerate() {
            let row = &mut rows[idx + 1];
            row[..n].copy_from_slice(&coefficients);
            row[num_columns] = rhs;

            match relation {
                Relation::LessEq => {
                    row[next_slack] = 1.0;
                    kinds[next_slack] = VariableKind::Slack;
                    names[next_slack] = format!("s{}", idx + 1);
                    basis.push(next_slack);
                    next_slack += 1;
                }
                Relation::GreaterEq => {
                    row[next_slack] = -1.0;
                    kinds[next_slack] = VariableKind::Surplus;
                    names[next_slack] = format!("e{}", idx + 1);
                    next_slack += 1;
                }
                Relation::Equal => {}
            }
            if relation != Relation::LessEq {
                row[next_artificial] = 1.0;
                names[next_artificial] = format!("a{}", idx + 1);
                basis.push(next_artificial);
                next_artificial += 1;
            }
        }

        let negated = problem.sense == LpObjective::Minimize;
        let costs = if negated {
            problem.objective.iter().map(|c| -c).collect()
        } else {
            problem.objective.clone()
        };

        debug!(
            "standard form: {} constraints, {} decision, {} slack/surplus, {} artificial columns",
            basis.len(),
            n,
            num_slack,
            num_artificial,
        );

        Ok(StandardForm {
            tableau: Tableau::new(rows, basis, kinds, names),
            num_decision: n,
            first_artificial,
            costs,
            negated,
        })
    }

    /// Whether a phase 1 is needed to find a feasible basis
    pub fn has_artificials(&self) -> bool {
        self.first_artificial < self.tableau.num_variables()
    }

    /// Phase 1 objective: maximize minus the sum of the artificial variables
    pub fn phase_one_costs(&self) -> Vec<f64> {
        self.tableau
            .kinds()
            .iter()
            .map(|&k| if k == VariableKind::Artificial { -1.0 } else { 0.0 })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn less_eq_only_gets_slack_basis() {
        let lp = LinearProgram::new(LpObjective::Maximize, vec![3., 2.])
            .with_constraint(vec![1., 1.], Relation::LessEq, 4.)
            .with_constraint(vec![1., 3.], Relation::LessEq, 6.);
        let sf = StandardForm::build(&lp).unwrap();

        assert!(!sf.has_artificials());
        assert_eq!(sf.first_artificial, 4);
        assert_eq!(sf.costs, vec![3., 2.]);
        assert!(!sf.negated);
        let t = &sf.tableau;
        assert_eq!(t.num_variables(), 4);
        assert_eq!(t.basis_variable_for(1), Some(2));
        assert_eq!(t.basis_variable_for(2), Some(3));
        assert_eq!(t.rhs_column(), vec![0., 4., 6.]);
        assert!(t.basis_is_identity(1e-9));
    }

    #[test]
    fn mixed_relations_column_layout() {
        let lp = LinearProgram::new(LpObjective::Minimize, vec![1., 1.])
            .with_constraint(vec![1., 1.], Relation::Equal, 4.)
            .with_constraint(vec![1., 0.], Relation::GreaterEq, 1.)
            .with_constraint(vec![0., 1.], Relation::LessEq, 5.);
        let sf = StandardForm::build(&lp).unwrap();
        let t = &sf.tableau;

        let names: Vec<_> = t.variables().into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["x1", "x2", "e2", "s3", "a1", "a2"]);
        assert_eq!(
            t.kinds(),
            &[
                VariableKind::Decision,
                VariableKind::Decision,
                VariableKind::Surplus,
                VariableKind::Slack,
                VariableKind::Artificial,
                VariableKind::Artificial,
            ]
        );
        assert_eq!(sf.first_artificial, 4);
        assert!(sf.has_artificials());
        assert!(sf.negated);
        assert_eq!(sf.costs, vec![-1., -1.]);
        assert_eq!(sf.phase_one_costs(), vec![0., 0., 0., 0., -1., -1.]);

        assert_eq!(t.value_at(2, 2), -1.0);
        assert_eq!(t.value_at(2, 5), 1.0);
        assert_eq!(t.basis_variable_for(1), Some(4));
        assert_eq!(t.basis_variable_for(2), Some(5));
        assert_eq!(t.basis_variable_for(3), Some(3));
        assert!(t.basis_is_identity(1e-9));
    }

    #[test]
    fn negative_rhs_flips_row_and_relation() {
        let lp = LinearProgram::new(LpObjective::Maximize, vec![1., 1.])
            .with_constraint(vec![-1., -1.], Relation::LessEq, -2.);
        let sf = StandardForm::build(&lp).unwrap();
        let t = &sf.tableau;

        // -x1 - x2 <= -2 becomes x1 + x2 >= 2
        assert_eq!(t.kinds()[2], VariableKind::Surplus);
        assert_eq!(t.kinds()[3], VariableKind::Artificial);
        assert_eq!(t.value_at(1, 0), 1.0);
        assert_eq!(t.value_at(1, 1), 1.0);
        assert_eq!(t.value_at(1, 2), -1.0);
        assert_eq!(t.rhs_column()[1], 2.0);
        assert!(t.is_primal_feasible(1e-9));
    }

    #[test]
    fn malformed_problem_is_rejected() {
        let lp = LinearProgram::new(LpObjective::Maximize, vec![1., 1.])
            .with_constraint(vec![1.], Relation::LessEq, 2.);
        assert!(matches!(
            StandardForm::build(&lp),
            Err(MalformedInputError::ArityMismatch { .. })
        ));
    }
}
