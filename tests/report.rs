use std::fs;
use std::io::{Seek, SeekFrom, Write};

use lp_simplex::lp_format::LpObjective;
use lp_simplex::problem::{LinearProgram, Relation};
use lp_simplex::solvers::{solve, SolverConfig};

fn textbook() -> LinearProgram {
    LinearProgram::new(LpObjective::Maximize, vec![3., 2.])
        .with_constraint(vec![1., 1.], Relation::LessEq, 4.)
        .with_constraint(vec![1., 3.], Relation::LessEq, 6.)
}

#[test]
fn optimal_report() {
    let solution = solve(&textbook(), &SolverConfig::default()).unwrap();
    let expected_str = "Status: Optimal
Iterations: 1
Objective: 12

Variables
  x1 = 4
  x2 = 0
";
    assert_eq!(solution.display_report().to_string(), expected_str);
}

#[test]
fn unbounded_report_has_no_values() {
    let lp = LinearProgram::new(LpObjective::Maximize, vec![1., 0.])
        .with_constraint(vec![1., -1.], Relation::LessEq, 1.);
    let solution = solve(&lp, &SolverConfig::default()).unwrap();
    assert_eq!(
        solution.display_report().to_string(),
        "Status: Unbounded\nIterations: 1\n"
    );
}

#[test]
fn iteration_limit_report() {
    let config = SolverConfig {
        max_iterations: Some(1),
        ..SolverConfig::default()
    };
    let lp = LinearProgram::new(LpObjective::Maximize, vec![1., 2.])
        .with_constraint(vec![1., 1.], Relation::LessEq, 6.)
        .with_constraint(vec![1., 3.], Relation::LessEq, 12.)
        .with_constraint(vec![2., 1.], Relation::LessEq, 10.);
    let solution = solve(&lp, &config).unwrap();
    assert_eq!(
        solution.display_report().to_string(),
        "Status: Iteration limit exceeded\nIterations: 1\n"
    );
}

#[test]
fn export_report_to_file() {
    let solution = solve(&textbook(), &SolverConfig::default()).unwrap();

    let mut file = tempfile::Builder::new()
        .prefix("solution")
        .suffix(".txt")
        .tempfile()
        .expect("Unable to create report file");
    solution.write_report(&mut file).unwrap();
    file.flush().unwrap();

    let written = fs::read_to_string(file.path()).unwrap();
    assert_eq!(written, solution.display_report().to_string());

    // writing again after rewinding gives the same content
    file.as_file_mut().set_len(0).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    solution.write_report(&mut file).unwrap();
    assert_eq!(fs::read_to_string(file.path()).unwrap(), written);
}
