//! Render problems in the .lp file format
//!
//! Decision variables are named `x1..xn` and bounded below by zero, matching
//! what the solver assumes.
use std::fmt;
use std::fmt::Formatter;

use crate::problem::{Constraint, LinearProgram};

/// Optimization sense
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum LpObjective {
    /// min
    Minimize,
    /// max
    Maximize,
}

/// Implemented by types that can be written as (part of) an .lp file
pub trait WriteToLpFileFormat {
    /// Write the object to the given formatter in the .lp format
    fn to_lp_file_format(&self, f: &mut fmt::Formatter) -> fmt::Result;

    /// Return an object whose [fmt::Display] implementation is the .lp text
    fn display_lp(&self) -> DisplayedLp<'_, Self>
    where
        Self: Sized,
    {
        DisplayedLp(self)
    }
}

impl<'a, T: WriteToLpFileFormat> WriteToLpFileFormat for &'a T {
    fn to_lp_file_format(&self, f: &mut Formatter) -> fmt::Result {
        (*self).to_lp_file_format(f)
    }
}

/// Name of the decision variable at `index` (zero based)
pub fn variable_name(index: usize) -> String {
    format!("x{}", index + 1)
}

/// A linear combination of the decision variables, one coefficient per variable
#[derive(Clone, Copy, Debug)]
pub struct LinearExpression<'a>(
    /// coefficients, zeros are skipped
    pub &'a [f64],
);

impl<'a> WriteToLpFileFormat for LinearExpression<'a> {
    fn to_lp_file_format(&self, f: &mut Formatter) -> fmt::Result {
        let mut first = true;
        for (idx, &coef) in self.0.iter().enumerate() {
            if coef == 0.0 {
                continue;
            }
            let sign = if coef < 0.0 { "-" } else { "+" };
            if first {
                if coef < 0.0 {
                    f.write_str("-")?;
                }
            } else {
                write!(f, " {} ", sign)?;
            }
            let magnitude = coef.abs();
            if magnitude != 1.0 {
                write!(f, "{} ", magnitude)?;
            }
            f.write_str(&variable_name(idx))?;
            first = false;
        }
        if first {
            f.write_str("0")?;
        }
        Ok(())
    }
}

impl WriteToLpFileFormat for Constraint {
    fn to_lp_file_format(&self, f: &mut Formatter) -> fmt::Result {
        LinearExpression(&self.coefficients).to_lp_file_format(f)?;
        write!(f, " {} {}", self.relation, self.rhs)
    }
}

impl WriteToLpFileFormat for LinearProgram {
    fn to_lp_file_format(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "\\ {}\n\n", self.name)?;
        objective_lp_file_block(self, f)?;
        write_constraints_lp_file_block(self, f)?;
        write_bounds_lp_file_block(self, f)?;
        write!(f, "\nEnd\n")?;
        Ok(())
    }
}

/// A value whose `Display` implementation outputs valid .lp syntax
pub struct DisplayedLp<'a, P>(&'a P);

impl<'a, P: WriteToLpFileFormat> std::fmt::Display for DisplayedLp<'a, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.to_lp_file_format(f)
    }
}

fn objective_lp_file_block(prob: &LinearProgram, f: &mut Formatter) -> fmt::Result {
    let obj_type = match prob.sense {
        LpObjective::Maximize => "Maximize\n  ",
        LpObjective::Minimize => "Minimize\n  ",
    };
    write!(f, "{}obj: ", obj_type)?;
    LinearExpression(&prob.objective).to_lp_file_format(f)
}

fn write_constraints_lp_file_block(prob: &LinearProgram, f: &mut Formatter) -> fmt::Result {
    if prob.constraints.is_empty() {
        return Ok(());
    }
    write!(f, "\n\nSubject To\n")?;
    for (idx, constraint) in prob.constraints.iter().enumerate() {
        write!(f, "  c{}: ", idx)?;
        constraint.to_lp_file_format(f)?;
        writeln!(f)?;
    }
    Ok(())
}

fn write_bounds_lp_file_block(prob: &LinearProgram, f: &mut Formatter) -> fmt::Result {
    if prob.constraints.is_empty() {
        writeln!(f)?;
    }
    write!(f, "\nBounds\n")?;
    for idx in 0..prob.num_variables() {
        writeln!(f, "  0 <= {}", variable_name(idx))?;
    }
    Ok(())
}
