//! Plain text rendering of a [Solution], for display or export.
//!
//! ```text
//! Status: Optimal
//! Iterations: 1
//! Objective: 12
//!
//! Variables
//!   x1 = 4
//!   x2 = 0
//! ```
use std::fmt;
use std::io;

use crate::lp_format::variable_name;
use crate::solvers::{Solution, Status};

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Optimal => "Optimal",
            Status::Unbounded => "Unbounded",
            Status::Infeasible => "Infeasible",
            Status::IterationLimitExceeded => "Iteration limit exceeded",
        })
    }
}

/// A solution whose `Display` implementation is the text report
pub struct DisplayedSolution<'a>(&'a Solution);

impl<'a> fmt::Display for DisplayedSolution<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solution = self.0;
        writeln!(f, "Status: {}", solution.status)?;
        writeln!(f, "Iterations: {}", solution.iterations)?;
        if let Some(objective) = solution.objective_value {
            writeln!(f, "Objective: {}", objective)?;
        }
        if !solution.variable_values.is_empty() {
            write!(f, "\nVariables\n")?;
            for (&idx, value) in solution.variable_values.iter() {
                writeln!(f, "  {} = {}", variable_name(idx), value)?;
            }
        }
        Ok(())
    }
}

impl Solution {
    /// Return an object whose [fmt::Display] implementation is the text report
    pub fn display_report(&self) -> DisplayedSolution<'_> {
        DisplayedSolution(self)
    }

    /// Write the text report to `writer`
    pub fn write_report<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{}", self.display_report())?;
        writer.flush()
    }
}
