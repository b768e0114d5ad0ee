#![deny(missing_docs)]
//! A library to solve linear programs with the two-phase tableau simplex method,
//! render them in the .lp file format and report their solutions as text.
//!
//! ```
//! use lp_simplex::lp_format::LpObjective;
//! use lp_simplex::problem::{LinearProgram, Relation};
//! use lp_simplex::solvers::{solve, SolverConfig, Status};
//!
//! let lp = LinearProgram::new(LpObjective::Maximize, vec![3., 2.])
//!     .with_constraint(vec![1., 1.], Relation::LessEq, 4.)
//!     .with_constraint(vec![1., 3.], Relation::LessEq, 6.);
//! let solution = solve(&lp, &SolverConfig::default()).unwrap();
//! assert_eq!(solution.status, Status::Optimal);
//! assert_eq!(solution.values(), vec![4., 0.]);
//! assert_eq!(solution.objective_value, Some(12.));
//! ```

pub mod error;
pub mod lp_format;
pub mod pivot;
pub mod problem;
pub mod report;
pub mod solvers;
pub mod standard_form;
pub mod tableau;
pub mod util;
