use crate::error::{SolveError, SolveResult};
use crate::linalg;

/// A linear program in canonical form:
/// minimize `c'x` subject to `Ax = b`, `x >= 0`.
///
/// Immutable once built; all solver state lives in [`crate::SolverState`].
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// Cost vector (length n)
    c: Vec<f64>,
    /// Constraint matrix, row-major (m rows of length n)
    a: Vec<Vec<f64>>,
    /// Right-hand side (length m)
    b: Vec<f64>,
    /// Optional free-text description
    description: Option<String>,
}

impl Problem {
    /// Builds a problem after checking that `c` has length n, `a` is m x n,
    /// `b` has length m, m <= n, and every entry is finite.
    pub fn new(c: Vec<f64>, a: Vec<Vec<f64>>, b: Vec<f64>) -> SolveResult<Self> {
        let n = c.len();
        let m = b.len();

        if a.len() != m {
            return Err(SolveError::ShapeMismatch(format!(
                "constraint matrix has {} rows but right-hand side has length {}",
                a.len(),
                m
            )));
        }
        for (i, row) in a.iter().enumerate() {
            if row.len() != n {
                return Err(SolveError::ShapeMismatch(format!(
                    "constraint row {} has {} columns but cost vector has length {}",
                    i,
                    row.len(),
                    n
                )));
            }
        }
        if m > n {
            return Err(SolveError::ShapeMismatch(format!(
                "{} constraints exceed {} variables",
                m, n
            )));
        }

        if let Some(index) = c.iter().position(|v| !v.is_finite()) {
            return Err(SolveError::NonFiniteInput { what: "c", index });
        }
        if let Some(index) = b.iter().position(|v| !v.is_finite()) {
            return Err(SolveError::NonFiniteInput { what: "b", index });
        }
        if let Some(index) = a.iter().flatten().position(|v| !v.is_finite()) {
            return Err(SolveError::NonFiniteInput { what: "A", index });
        }

        Ok(Self {
            c,
            a,
            b,
            description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn costs(&self) -> &[f64] {
        &self.c
    }

    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.a
    }

    pub fn rhs(&self) -> &[f64] {
        &self.b
    }

    /// n
    pub fn num_variables(&self) -> usize {
        self.c.len()
    }

    /// m
    pub fn num_constraints(&self) -> usize {
        self.b.len()
    }

    /// Column `j` of A
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.a.iter().map(|row| row[j]).collect()
    }

    /// The m x m submatrix of A at the given column indices, in order
    pub fn submatrix(&self, columns: &[usize]) -> Vec<Vec<f64>> {
        self.a
            .iter()
            .map(|row| columns.iter().map(|&j| row[j]).collect())
            .collect()
    }

    /// Objective value `c'x`
    pub fn cost(&self, x: &[f64]) -> f64 {
        linalg::dot(&self.c, x)
    }

    /// Largest absolute violation of `Ax = b`
    pub fn residual(&self, x: &[f64]) -> f64 {
        let ax = linalg::mat_vec(&self.a, x);
        ax.iter()
            .zip(&self.b)
            .map(|(lhs, rhs)| (lhs - rhs).abs())
            .fold(0.0, f64::max)
    }
}
