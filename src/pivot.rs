//! Gauss-Jordan elimination step, the only primitive that changes a tableau.

use crate::error::DegeneratePivotError;
use crate::util::is_zero;

/// Pivot on cell `(row, col)` of `rows`.
///
/// `rows[0]` is the objective row and the last column is the right-hand side.
/// `basis[r - 1]` holds the column basic in constraint row `r`.
///
/// After the call, column `col` reads exactly `1` in `row` and `0` in every
/// other row, and `basis[row - 1] == col`. Bounds are checked by the caller.
pub fn eliminate(
    rows: &mut [Vec<f64>],
    basis: &mut [usize],
    row: usize,
    col: usize,
    tolerance: f64,
) -> Result<(), DegeneratePivotError> {
    let pivot = rows[row][col];
    if is_zero(pivot, tolerance) || !pivot.is_finite() {
        return Err(DegeneratePivotError {
            row,
            col,
            value: pivot,
        });
    }

    for value in rows[row].iter_mut() {
        *value /= pivot;
    }
    rows[row][col] = 1.0;

    let (before, rest) = rows.split_at_mut(row);
    let (pivot_row, after) = rest.split_at_mut(1);
    let pivot_row = &pivot_row[0];
    for other in before.iter_mut().chain(after.iter_mut()) {
        let factor = other[col];
        if factor == 0.0 {
            continue;
        }
        for (value, &p) in other.iter_mut().zip(pivot_row.iter()) {
            *value -= factor * p;
        }
        other[col] = 0.0;
    }

    basis[row - 1] = col;
    Ok(())
}
