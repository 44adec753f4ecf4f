use super::balancer_api::BalanceError;
use log::{debug, error};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// One non-trivial solution of a homogeneous system.
/// `free_column` is the unknown that was fixed to 1; `values` holds every other unknown in
/// column order (the free column is skipped).
#[derive(Debug, Clone, PartialEq)]
pub struct NullSpaceVector {
    pub free_column: usize,
    pub values: Vec<BigRational>,
}

impl NullSpaceVector {
    /// full solution vector with the free unknown put back at its place
    pub fn to_full(&self) -> Vec<BigRational> {
        let mut full = self.values.clone();
        full.insert(self.free_column, BigRational::one());
        full
    }
}

fn unsolvable(reason: String) -> BalanceError {
    error!("elimination failed: {}", reason);
    BalanceError::UnsolvableSystem(reason)
}

/// Reduces an augmented matrix (last column = right-hand side) to reduced row echelon form in
/// place. Pivots are chosen by the largest absolute value in the column. Returns the pivot
/// column of every non-zero row, top to bottom.
pub fn reduce_row_echelon(matrix: &mut [Vec<BigRational>], n: usize) -> Vec<usize> {
    let m = matrix.len();
    let mut pivot_columns = Vec::new();
    let mut row = 0;
    for col in 0..n {
        if row == m {
            break;
        }
        let i_max = (row..m)
            .max_by(|&a, &b| matrix[a][col].abs().cmp(&matrix[b][col].abs()))
            .unwrap_or(row);
        if matrix[i_max][col].is_zero() {
            continue;
        }
        matrix.swap(row, i_max);

        let pivot = matrix[row][col].clone();
        for entry in matrix[row][col..=n].iter_mut() {
            *entry = &*entry / &pivot;
        }
        let pivot_row = matrix[row].clone();
        for (i, other) in matrix.iter_mut().enumerate() {
            if i == row || other[col].is_zero() {
                continue;
            }
            let factor = other[col].clone();
            for j in col..=n {
                other[j] -= &factor * &pivot_row[j];
            }
        }
        pivot_columns.push(col);
        row += 1;
    }
    pivot_columns
}

/// Solves `A x = b` given as rows `[a_1 .. a_n | b]` and returns one non-trivial solution with
/// the first free unknown set to 1 and any further free unknowns set to 0.
/// Fails when the rows have different lengths, when the system is inconsistent, or when it has
/// no free unknown (only the trivial solution).
/// With two or more free unknowns the returned vector has zeros in it, and `normalize` turns
/// those into `UnsolvableSystem`: an equation made of independent reactions is never balanced.
pub fn solve_homogeneous(mut system: Vec<Vec<BigRational>>) -> Result<NullSpaceVector, BalanceError> {
    let width = system.first().map(|row| row.len()).unwrap_or(0);
    if width < 2 {
        return Err(unsolvable("system has no unknowns".to_string()));
    }
    if system.iter().any(|row| row.len() != width) {
        return Err(unsolvable("rows of the system have different lengths".to_string()));
    }
    let n = width - 1;

    let pivot_columns = reduce_row_echelon(&mut system, n);
    let rank = pivot_columns.len();
    debug!("rank {} of {} unknowns", rank, n);

    // rows below the rank are zero on the left, so their right-hand side must be zero too
    if let Some(row) = system[rank..].iter().find(|row| !row[n].is_zero()) {
        return Err(unsolvable(format!(
            "inconsistent equation 0 = {}",
            row[n]
        )));
    }

    let free_column = (0..n)
        .find(|col| !pivot_columns.contains(col))
        .ok_or_else(|| unsolvable("only the trivial solution exists".to_string()))?;
    if n - rank > 1 {
        debug!(
            "{} free unknowns, taking the one in column {}",
            n - rank,
            free_column
        );
    }

    let mut values = Vec::with_capacity(n - 1);
    for col in (0..n).filter(|&col| col != free_column) {
        let value = match pivot_columns.iter().position(|&c| c == col) {
            Some(r) => &system[r][n] - &system[r][free_column],
            None => BigRational::zero(),
        };
        values.push(value);
    }
    Ok(NullSpaceVector {
        free_column,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn r(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn int_rows(rows: &[&[i64]]) -> Vec<Vec<BigRational>> {
        rows.iter()
            .map(|row| row.iter().map(|&v| r(v, 1)).collect())
            .collect()
    }

    #[test]
    fn test_water_synthesis() {
        // H: 2a - 2c = 0, O: 2b - c = 0
        let system = int_rows(&[&[2, 0, -2, 0], &[0, 2, -1, 0]]);
        let solution = solve_homogeneous(system).unwrap();
        assert_eq!(solution.free_column, 2);
        assert_eq!(solution.values, vec![r(1, 1), r(1, 2)]);
        assert_eq!(solution.to_full(), vec![r(1, 1), r(1, 2), r(1, 1)]);
    }

    #[test]
    fn test_more_equations_than_unknowns() {
        // NaOH + H2SO4 = Na2SO4 + H2O, rows H, Na, O, S
        let system = int_rows(&[
            &[1, 2, 0, -2, 0],
            &[1, 0, -2, 0, 0],
            &[1, 4, -4, -1, 0],
            &[0, 1, -1, 0, 0],
        ]);
        let solution = solve_homogeneous(system).unwrap();
        assert_eq!(solution.free_column, 3);
        assert_eq!(solution.values, vec![r(1, 1), r(1, 2), r(1, 2)]);
    }

    #[test]
    fn test_trivial_solution_only() {
        // CO + H2 = CH4, rows C, H, O
        let system = int_rows(&[&[1, 0, -1, 0], &[0, 2, -4, 0], &[1, 0, 0, 0]]);
        let result = solve_homogeneous(system);
        assert!(matches!(result, Err(BalanceError::UnsolvableSystem(_))));
    }

    #[test]
    fn test_two_free_unknowns_takes_first() {
        // H2 + O2 = H2O2 + H2O
        let system = int_rows(&[&[2, 0, -2, -2, 0], &[0, 2, -2, -1, 0]]);
        let solution = solve_homogeneous(system).unwrap();
        assert_eq!(solution.free_column, 2);
        // x3 is free as well and stays 0
        assert_eq!(solution.values, vec![r(1, 1), r(1, 1), r(0, 1)]);
    }

    #[test]
    fn test_inconsistent_system() {
        let system = int_rows(&[&[1, 1, 2], &[2, 2, 5]]);
        assert!(matches!(
            solve_homogeneous(system),
            Err(BalanceError::UnsolvableSystem(_))
        ));
    }

    #[test]
    fn test_malformed_system() {
        assert!(solve_homogeneous(vec![]).is_err());
        assert!(solve_homogeneous(int_rows(&[&[1, 0], &[1]])).is_err());
    }

    #[test]
    fn test_reduce_row_echelon() {
        let mut matrix = int_rows(&[&[2, 1, -1, 8], &[-3, -1, 2, -11], &[-2, 1, 2, -3]]);
        let pivots = reduce_row_echelon(&mut matrix, 3);
        assert_eq!(pivots, vec![0, 1, 2]);
        assert_eq!(
            matrix,
            int_rows(&[&[1, 0, 0, 2], &[0, 1, 0, 3], &[0, 0, 1, -1]])
        );
    }
}
