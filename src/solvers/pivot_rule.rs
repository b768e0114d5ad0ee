//! Entering column selection.
//!
//! Row 0 holds `z_j - c_j`: a negative entry means the objective improves if
//! that column enters the basis.

use crate::util::is_negative;

/// How the entering column is chosen among the improving ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PivotRule {
    /// Most negative entry of row 0, lowest index on ties
    Dantzig,
    /// Lowest index among all negative entries. Guarantees termination
    /// under degeneracy.
    Bland,
}

impl Default for PivotRule {
    fn default() -> Self {
        PivotRule::Dantzig
    }
}

impl PivotRule {
    /// Column to bring into the basis, or `None` when no entry of
    /// `objective_row` is below `-tolerance` (the tableau is optimal).
    ///
    /// `objective_row` excludes the right-hand side, and any column the
    /// caller does not want to enter.
    pub fn entering_column(self, objective_row: &[f64], tolerance: f64) -> Option<usize> {
        let mut improving = objective_row
            .iter()
            .enumerate()
            .filter(|&(_, &v)| is_negative(v, tolerance));
        match self {
            PivotRule::Bland => improving.next().map(|(j, _)| j),
            PivotRule::Dantzig => improving
                .fold(None, |best: Option<(usize, f64)>, (j, &v)| match best {
                    Some((_, b)) if b <= v => best,
                    _ => Some((j, v)),
                })
                .map(|(j, _)| j),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn optimal_row_has_no_entering_column() {
        assert_eq!(PivotRule::Dantzig.entering_column(&[0., 1., 3., 0.], TOL), None);
        assert_eq!(PivotRule::Bland.entering_column(&[0., 1., -1e-12], TOL), None);
        assert_eq!(PivotRule::Dantzig.entering_column(&[], TOL), None);
    }

    #[test]
    fn dantzig_takes_most_negative_lowest_index_on_ties() {
        assert_eq!(PivotRule::Dantzig.entering_column(&[-3., -2., 0.], TOL), Some(0));
        assert_eq!(PivotRule::Dantzig.entering_column(&[-1., -5., 2., -5.], TOL), Some(1));
    }

    #[test]
    fn bland_takes_first_negative() {
        assert_eq!(PivotRule::Bland.entering_column(&[1., -1., -5.], TOL), Some(1));
    }
}
