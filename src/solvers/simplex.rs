//! Two-phase tableau simplex method.
//!
//! A [SimplexRun] moves through the states
//! `Initialized -> Iterating(One)? -> Iterating(Two) -> terminal`, one
//! [SimplexRun::step] at a time. [SimplexSolver] drives a run to the end.
use std::collections::BTreeMap;

use log::{debug, trace};

use crate::error::SolveError;
use crate::problem::LinearProgram;
use crate::solvers::{
    ratio_test, PivotRule, Solution, SolverConfig, SolverTrait, Status, WithMaxIterations,
    WithTolerance,
};
use crate::standard_form::StandardForm;
use crate::tableau::Tableau;
use crate::util::{clean, is_negative, is_zero};

/// Simplex phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Looking for a feasible basis by driving the artificial variables to zero
    One,
    /// Optimizing the real objective
    Two,
}

/// State of a [SimplexRun]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverState {
    /// Tableau built, no objective installed yet
    Initialized,
    /// Pivoting
    Iterating(Phase),
    /// Terminal: optimum found
    Optimal,
    /// Terminal: objective unbounded
    Unbounded,
    /// Terminal: phase 1 could not reach zero
    Infeasible,
    /// Terminal: the iteration cap was hit
    IterationLimitExceeded,
}

impl SolverState {
    /// Whether the run is over
    pub fn is_terminal(self) -> bool {
        !matches!(self, SolverState::Initialized | SolverState::Iterating(_))
    }

    /// Status reported for a terminal state
    pub fn status(self) -> Option<Status> {
        match self {
            SolverState::Optimal => Some(Status::Optimal),
            SolverState::Unbounded => Some(Status::Unbounded),
            SolverState::Infeasible => Some(Status::Infeasible),
            SolverState::IterationLimitExceeded => Some(Status::IterationLimitExceeded),
            SolverState::Initialized | SolverState::Iterating(_) => None,
        }
    }
}

/// A single solve, owning its tableau
#[derive(Debug, Clone)]
pub struct SimplexRun {
    form: StandardForm,
    config: SolverConfig,
    state: SolverState,
    iterations: usize,
    max_iterations: usize,
}

impl SimplexRun {
    /// Validate the configuration and the problem, and build the initial tableau
    pub fn new(problem: &LinearProgram, config: &SolverConfig) -> Result<SimplexRun, SolveError> {
        config.validate()?;
        let form = StandardForm::build(problem)?;
        let max_iterations = config.iteration_cap(&form.tableau);
        debug!(
            "initialized simplex run: rows: {}, columns: {}, artificial: {}, rule: {:?}, max iterations: {}",
            form.tableau.num_rows(),
            form.tableau.num_variables() + 1,
            form.tableau.num_variables() - form.first_artificial,
            config.pivot_rule,
            max_iterations,
        );
        Ok(SimplexRun {
            form,
            config: *config,
            state: SolverState::Initialized,
            iterations: 0,
            max_iterations,
        })
    }

    /// Current state
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Current tableau
    pub fn tableau(&self) -> &Tableau {
        &self.form.tableau
    }

    /// The standard form being solved
    pub fn standard_form(&self) -> &StandardForm {
        &self.form
    }

    /// Pivots performed so far, over both phases
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Pivots allowed before giving up
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Perform one transition. Terminal states are left unchanged.
    pub fn step(&mut self) -> Result<SolverState, SolveError> {
        self.state = match self.state {
            SolverState::Initialized => self.start(),
            SolverState::Iterating(phase) => self.iterate(phase)?,
            terminal => terminal,
        };
        Ok(self.state)
    }

    /// Step until a terminal state is reached and read off the solution
    pub fn run_to_end(&mut self) -> Result<Solution, SolveError> {
        loop {
            if let Some(status) = self.state.status() {
                return Ok(self.extract(status));
            }
            self.step()?;
        }
    }

    /// Read the solution off a terminal tableau. `None` while still running.
    ///
    /// Does not change the run, so repeated calls give identical results.
    pub fn solution(&self) -> Option<Solution> {
        self.state.status().map(|status| self.extract(status))
    }

    fn extract(&self, status: Status) -> Solution {
        if status != Status::Optimal {
            return Solution::without_values(status, self.iterations);
        }
        let tolerance = self.config.tolerance;
        let values: BTreeMap<usize, f64> = self
            .form
            .tableau
            .basic_solution(self.form.num_decision, tolerance)
            .into_iter()
            .enumerate()
            .collect();
        let mut objective = self.form.tableau.objective_value();
        if self.form.negated {
            objective = -objective;
        }
        Solution::new(values, clean(objective, tolerance), self.iterations)
    }

    fn start(&mut self) -> SolverState {
        if self.form.has_artificials() {
            let costs = self.form.phase_one_costs();
            self.form.tableau.install_objective(&costs);
            debug!(
                "phase 1: infeasibility {}",
                -self.form.tableau.objective_value()
            );
            SolverState::Iterating(Phase::One)
        } else {
            self.enter_phase_two()
        }
    }

    fn enter_phase_two(&mut self) -> SolverState {
        self.form.tableau.install_objective(&self.form.costs);
        debug!(
            "phase 2 after {} iterations: obj.: {}",
            self.iterations,
            self.form.tableau.objective_value()
        );
        SolverState::Iterating(Phase::Two)
    }

    fn iterate(&mut self, phase: Phase) -> Result<SolverState, SolveError> {
        let tolerance = self.config.tolerance;
        // artificial columns never re-enter once phase 1 is over
        let eligible = match phase {
            Phase::One => self.form.tableau.num_variables(),
            Phase::Two => self.form.first_artificial,
        };
        let entering = self
            .config
            .pivot_rule
            .entering_column(&self.form.tableau.objective_row()[..eligible], tolerance);

        let col = match entering {
            Some(col) => col,
            None => return self.finish_phase(phase),
        };

        if self.iterations >= self.max_iterations {
            debug!(
                "iteration limit {} reached in {:?}, obj.: {}",
                self.max_iterations,
                phase,
                self.form.tableau.objective_value()
            );
            return Ok(SolverState::IterationLimitExceeded);
        }

        let row = match ratio_test::leaving_row(&self.form.tableau, col, tolerance) {
            Some(row) => row,
            None => {
                debug!(
                    "unbounded along column {} after {} iterations",
                    self.form.tableau.name_of(col),
                    self.iterations
                );
                return Ok(SolverState::Unbounded);
            }
        };

        trace!(
            "iteration {}: pivot at row {}, column {} ({} enters), value {}",
            self.iterations + 1,
            row,
            col,
            self.form.tableau.name_of(col),
            self.form.tableau.value_at(row, col),
        );
        self.form.tableau.pivot(row, col, tolerance)?;
        self.iterations += 1;
        trace!("tableau:\n{}", self.form.tableau);

        Ok(SolverState::Iterating(phase))
    }

    fn finish_phase(&mut self, phase: Phase) -> Result<SolverState, SolveError> {
        match phase {
            Phase::One => {
                // phase 1 maximizes minus the sum of the artificials
                let optimum = self.form.tableau.objective_value();
                if is_negative(optimum, self.config.tolerance) {
                    debug!(
                        "infeasible after {} iterations: artificial sum {}",
                        self.iterations, -optimum
                    );
                    return Ok(SolverState::Infeasible);
                }
                self.drive_out_artificials()?;
                Ok(self.enter_phase_two())
            }
            Phase::Two => {
                debug!(
                    "found optimum in {} iterations, obj.: {}",
                    self.iterations,
                    self.form.tableau.objective_value()
                );
                Ok(SolverState::Optimal)
            }
        }
    }

    /// Replace artificial variables still basic (at zero) by any non-artificial
    /// column with a non-zero entry in their row. Rows without one are
    /// redundant and keep their artificial.
    fn drive_out_artificials(&mut self) -> Result<(), SolveError> {
        let tolerance = self.config.tolerance;
        let first_artificial = self.form.first_artificial;
        for row in 1..self.form.tableau.num_rows() {
            let basic = match self.form.tableau.basis_variable_for(row) {
                Some(col) if col >= first_artificial => col,
                _ => continue,
            };
            let replacement = (0..first_artificial)
                .find(|&col| !is_zero(self.form.tableau.value_at(row, col), tolerance));
            match replacement {
                Some(col) => {
                    trace!(
                        "driving {} out of row {} with {}",
                        self.form.tableau.name_of(basic),
                        row,
                        self.form.tableau.name_of(col)
                    );
                    self.form.tableau.pivot(row, col, tolerance)?;
                }
                None => trace!("row {} is redundant", row),
            }
        }
        Ok(())
    }
}

/// Tableau simplex solver
#[derive(Debug, Clone, Default)]
pub struct SimplexSolver {
    config: SolverConfig,
}

impl SimplexSolver {
    /// Solver with the default configuration
    pub fn new() -> SimplexSolver {
        SimplexSolver::default()
    }

    /// Solver with the given configuration
    pub fn with_config(config: SolverConfig) -> SimplexSolver {
        SimplexSolver { config }
    }

    /// Current configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Current entering column rule
    pub fn pivot_rule(&self) -> PivotRule {
        self.config.pivot_rule
    }

    /// Copy of the solver using the given entering column rule
    pub fn with_pivot_rule(&self, pivot_rule: PivotRule) -> SimplexSolver {
        SimplexSolver {
            config: SolverConfig {
                pivot_rule,
                ..self.config
            },
        }
    }
}

impl WithMaxIterations<SimplexSolver> for SimplexSolver {
    fn max_iterations(&self) -> Option<usize> {
        self.config.max_iterations
    }
    fn with_max_iterations(&self, iterations: usize) -> SimplexSolver {
        SimplexSolver {
            config: SolverConfig {
                max_iterations: Some(iterations),
                ..self.config
            },
        }
    }
}

impl WithTolerance<SimplexSolver> for SimplexSolver {
    fn tolerance(&self) -> f64 {
        self.config.tolerance
    }
    fn with_tolerance(&self, tolerance: f64) -> SimplexSolver {
        SimplexSolver {
            config: SolverConfig {
                tolerance,
                ..self.config
            },
        }
    }
}

impl SolverTrait for SimplexSolver {
    fn run(&self, problem: &LinearProgram) -> Result<Solution, SolveError> {
        let mut run = SimplexRun::new(problem, &self.config)?;
        let solution = run.run_to_end()?;
        debug!(
            "solved {}: {:?} after {} iterations",
            problem.name, solution.status, solution.iterations
        );
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::lp_format::LpObjective;
    use crate::problem::Relation;

    fn textbook() -> LinearProgram {
        LinearProgram::new(LpObjective::Maximize, vec![3., 2.])
            .with_constraint(vec![1., 1.], Relation::LessEq, 4.)
            .with_constraint(vec![1., 3.], Relation::LessEq, 6.)
    }

    #[test]
    fn states_without_phase_one() {
        let mut run = SimplexRun::new(&textbook(), &SolverConfig::default()).unwrap();
        assert_eq!(run.state(), SolverState::Initialized);
        assert_eq!(run.solution(), None);

        assert_eq!(run.step().unwrap(), SolverState::Iterating(Phase::Two));
        assert_eq!(run.tableau().objective_row(), &[-3., -2., 0., 0.]);
        assert_eq!(run.step().unwrap(), SolverState::Iterating(Phase::Two));
        assert_eq!(run.iterations(), 1);
        assert_eq!(run.step().unwrap(), SolverState::Optimal);
        assert_eq!(run.step().unwrap(), SolverState::Optimal);
        assert_eq!(run.iterations(), 1);

        let solution = run.solution().unwrap();
        assert_eq!(solution.values(), vec![4., 0.]);
        assert_eq!(solution.objective_value, Some(12.));
    }

    #[test]
    fn phase_one_precedes_phase_two() {
        let lp = LinearProgram::new(LpObjective::Minimize, vec![4., 1.])
            .with_constraint(vec![1., 3.], Relation::GreaterEq, 4.)
            .with_constraint(vec![2., 1.], Relation::GreaterEq, 3.);
        let mut run = SimplexRun::new(&lp, &SolverConfig::default()).unwrap();

        assert_eq!(run.step().unwrap(), SolverState::Iterating(Phase::One));
        assert_abs_diff_eq!(run.tableau().objective_value(), -7.0);
        let mut seen_phase_two = false;
        while !run.state().is_terminal() {
            if run.step().unwrap() == SolverState::Iterating(Phase::Two) {
                seen_phase_two = true;
            }
        }
        assert!(seen_phase_two);
        assert_eq!(run.state(), SolverState::Optimal);

        let solution = run.solution().unwrap();
        assert_abs_diff_eq!(solution.objective_value.unwrap(), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.value(0).unwrap(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.value(1).unwrap(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn artificials_leave_the_basis_before_phase_two() {
        // the second equality is redundant, its artificial stays basic at zero
        let lp = LinearProgram::new(LpObjective::Maximize, vec![1., 1.])
            .with_constraint(vec![1., 1.], Relation::Equal, 2.)
            .with_constraint(vec![2., 2.], Relation::Equal, 4.);
        let mut run = SimplexRun::new(&lp, &SolverConfig::default()).unwrap();
        assert_eq!(run.run_to_end().unwrap().status, Status::Optimal);

        let t = run.tableau();
        let first_artificial = run.standard_form().first_artificial;
        for row in 1..t.num_rows() {
            let col = t.basis_variable_for(row).unwrap();
            if col >= first_artificial {
                assert_abs_diff_eq!(t.rhs_column()[row], 0.0, epsilon = 1e-9);
            }
        }
        assert_abs_diff_eq!(run.solution().unwrap().objective_value.unwrap(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn solver_builders_keep_other_settings() {
        let solver = SimplexSolver::new()
            .with_tolerance(1e-7)
            .with_max_iterations(12)
            .with_pivot_rule(PivotRule::Bland);
        assert_eq!(solver.tolerance(), 1e-7);
        assert_eq!(solver.max_iterations(), Some(12));
        assert_eq!(solver.pivot_rule(), PivotRule::Bland);
    }

    #[test]
    fn no_constraints() {
        let lp = LinearProgram::new(LpObjective::Minimize, vec![1., 2.]);
        let solution = SimplexSolver::new().run(&lp).unwrap();
        assert_eq!(solution.status, Status::Optimal);
        assert_eq!(solution.values(), vec![0., 0.]);
        assert_eq!(solution.objective_value, Some(0.));

        let lp = LinearProgram::new(LpObjective::Maximize, vec![1., 0.]);
        let solution = SimplexSolver::new().run(&lp).unwrap();
        assert_eq!(solution.status, Status::Unbounded);
    }
}
