//! Dense linear algebra on row-major `Vec<Vec<f64>>` matrices.
//!
//! Only what the basis bookkeeping needs: rank, inverse, products.

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn mat_vec(m: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
    m.iter().map(|row| dot(row, v)).collect()
}

/// Row vector times matrix: `v' M`
pub fn vec_mat(v: &[f64], m: &[Vec<f64>]) -> Vec<f64> {
    let cols = m.first().map_or(0, |row| row.len());
    let mut out = vec![0.0; cols];
    for (coef, row) in v.iter().zip(m) {
        for (o, &val) in out.iter_mut().zip(row) {
            *o += coef * val;
        }
    }
    out
}

pub fn mat_mul(a: &[Vec<f64>], b: &[Vec<f64>]) -> Vec<Vec<f64>> {
    a.iter().map(|row| vec_mat(row, b)).collect()
}

/// Largest absolute entry; 0 for an all-zero or empty matrix
fn scale(m: &[Vec<f64>]) -> f64 {
    m.iter().flatten().map(|v| v.abs()).fold(0.0, f64::max)
}

/// Numerical rank by Gaussian elimination with partial pivoting.
///
/// A pivot counts only when its magnitude exceeds `tolerance` times the
/// largest entry of the matrix.
pub fn rank(m: &[Vec<f64>], tolerance: f64) -> usize {
    let mut work = m.to_vec();
    let rows = work.len();
    let cols = work.first().map_or(0, |row| row.len());
    let threshold = tolerance * scale(m);

    let mut rank = 0;
    for col in 0..cols {
        if rank == rows {
            break;
        }

        let Some(pivot_row) = (rank..rows).max_by(|&i, &k| {
            work[i][col]
                .abs()
                .partial_cmp(&work[k][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        }) else {
            break;
        };
        if work[pivot_row][col].abs() <= threshold {
            continue;
        }

        work.swap(rank, pivot_row);
        let pivot_val = work[rank][col];
        for i in (rank + 1)..rows {
            let factor = work[i][col] / pivot_val;
            if factor != 0.0 {
                for j in col..cols {
                    work[i][j] -= factor * work[rank][j];
                }
            }
        }
        rank += 1;
    }
    rank
}

/// Inverse of a square matrix by Gauss-Jordan elimination with partial
/// pivoting. Returns `None` when a pivot falls below `tolerance` times the
/// largest entry.
pub fn invert(m: &[Vec<f64>], tolerance: f64) -> Option<Vec<Vec<f64>>> {
    let n = m.len();
    let threshold = tolerance * scale(m);

    // Augmented [M | I]
    let mut work: Vec<Vec<f64>> = m
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut aug = row.clone();
            aug.extend((0..n).map(|j| if i == j { 1.0 } else { 0.0 }));
            aug
        })
        .collect();

    for col in 0..n {
        let pivot_row = (col..n).max_by(|&i, &k| {
            work[i][col]
                .abs()
                .partial_cmp(&work[k][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if !(work[pivot_row][col].abs() > threshold) {
            return None;
        }
        work.swap(col, pivot_row);

        // Scale pivot row
        let pivot_val = work[col][col];
        for val in work[col].iter_mut() {
            *val /= pivot_val;
        }

        // Eliminate column in other rows
        let pivot = work[col].clone();
        for (i, row) in work.iter_mut().enumerate() {
            if i != col {
                let factor = row[col];
                if factor != 0.0 {
                    for (val, p) in row.iter_mut().zip(&pivot) {
                        *val -= factor * p;
                    }
                }
            }
        }
    }

    Some(work.into_iter().map(|row| row[n..].to_vec()).collect())
}

/// Largest deviation of `a * b` from the identity
pub fn identity_residual(a: &[Vec<f64>], b: &[Vec<f64>]) -> f64 {
    mat_mul(a, b)
        .iter()
        .enumerate()
        .flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(move |(j, &v)| if i == j { (v - 1.0).abs() } else { v.abs() })
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank() {
        let full = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
        assert_eq!(rank(&full, 1e-9), 2);

        let deficient = vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0], vec![0.0, 1.0, 1.0]];
        assert_eq!(rank(&deficient, 1e-9), 2);

        let zero = vec![vec![0.0, 0.0], vec![0.0, 0.0]];
        assert_eq!(rank(&zero, 1e-9), 0);

        let empty: Vec<Vec<f64>> = Vec::new();
        assert_eq!(rank(&empty, 1e-9), 0);
    }

    #[test]
    fn test_invert() {
        let m = vec![vec![4.0, 7.0], vec![2.0, 6.0]];
        let inv = invert(&m, 1e-9).unwrap();

        assert!((inv[0][0] - 0.6).abs() < 1e-12);
        assert!((inv[0][1] + 0.7).abs() < 1e-12);
        assert!((inv[1][0] + 0.2).abs() < 1e-12);
        assert!((inv[1][1] - 0.4).abs() < 1e-12);
        assert!(identity_residual(&m, &inv) < 1e-12);
    }

    #[test]
    fn test_invert_needs_row_swap() {
        let m = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let inv = invert(&m, 1e-9).unwrap();
        assert_eq!(inv, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn test_invert_singular() {
        let m = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        assert!(invert(&m, 1e-9).is_none());
    }

    #[test]
    fn test_small_entries_are_not_singular() {
        let tiny = vec![vec![2e-10, 1e-10], vec![1e-10, 3e-10]];
        assert_eq!(rank(&tiny, 1e-9), 2);

        let inv = invert(&tiny, 1e-9).unwrap();
        assert!(identity_residual(&tiny, &inv) < 1e-9);
        assert!((inv[0][0] - 0.6e10).abs() < 1e-3);

        let single = vec![vec![1e-10]];
        assert_eq!(rank(&single, 1e-9), 1);
        assert!(invert(&single, 1e-9).is_some());
    }

    #[test]
    fn test_small_singular_matrix() {
        let tiny = vec![vec![1e-10, 2e-10], vec![2e-10, 4e-10]];
        assert_eq!(rank(&tiny, 1e-9), 1);
        assert!(invert(&tiny, 1e-9).is_none());
    }

    #[test]
    fn test_products() {
        let m = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(mat_vec(&m, &[1.0, 1.0]), vec![3.0, 7.0]);
        assert_eq!(vec_mat(&[1.0, 1.0], &m), vec![4.0, 6.0]);
        assert_eq!(dot(&[1.0, 2.0], &[3.0, 4.0]), 11.0);
    }
}
