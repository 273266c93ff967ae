use tracing::debug;

use crate::error::{SolveError, SolveResult};
use crate::linalg;
use crate::pivot::Pivot;
use crate::problem::Problem;

/// Largest tolerated deviation of `B * B^-1` from the identity
const INVERSE_RESIDUAL_LIMIT: f64 = 1e-6;

/// The mutable half of a solve: the current basis and everything derived from it.
///
/// Only [`SolverState::from_basis`] and [`SolverState::change_basis`] produce
/// values of this type, so the derived fields always agree with `basis`.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverState {
    /// Column indices into A, one per basic position
    basis: Vec<usize>,
    /// B: the columns of A at `basis`
    basis_matrix: Vec<Vec<f64>>,
    /// B^-1, recomputed from scratch whenever the basis changes
    basis_inverse: Vec<Vec<f64>>,
    /// xb = B^-1 b
    basic_values: Vec<f64>,
    /// Full solution vector x (length n)
    values: Vec<f64>,
    /// cb: costs at the basic indices
    basic_costs: Vec<f64>,
}

impl SolverState {
    /// Builds the state for a basis whose submatrix is already known to be
    /// nonsingular. x is xb scattered onto the basic indices, zero elsewhere.
    pub fn from_basis(problem: &Problem, basis: Vec<usize>, tolerance: f64) -> SolveResult<Self> {
        let (basis_matrix, basis_inverse, basic_values) = factor(problem, &basis, tolerance)?;

        let mut values = vec![0.0; problem.num_variables()];
        for (&index, &value) in basis.iter().zip(&basic_values) {
            values[index] = value;
        }
        let basic_costs = basic_costs(problem, &basis);

        Ok(Self {
            basis,
            basis_matrix,
            basis_inverse,
            basic_values,
            values,
            basic_costs,
        })
    }

    /// Commits a pivot and returns the successor state.
    ///
    /// The step is `y = x + theta * d` with `d[basis[i]] = -u[i]` and
    /// `d[entering] = 1`; the entering index replaces the basic index at the
    /// leaving position. `self` is consumed, so on error the caller holds no
    /// half-updated state.
    pub fn change_basis(self, problem: &Problem, pivot: &Pivot, tolerance: f64) -> SolveResult<Self> {
        let direction = self.direction(pivot.entering, &pivot.direction);
        let values: Vec<f64> = self
            .values
            .iter()
            .zip(&direction)
            .map(|(x, d)| x + pivot.theta * d)
            .collect();

        let mut basis = self.basis;
        let leaving = basis[pivot.leaving_position];
        basis[pivot.leaving_position] = pivot.entering;

        let (basis_matrix, basis_inverse, basic_values) = factor(problem, &basis, tolerance)?;
        let basic_costs = basic_costs(problem, &basis);

        debug!(
            entering = pivot.entering,
            leaving,
            position = pivot.leaving_position,
            theta = pivot.theta,
            "committed pivot"
        );

        Ok(Self {
            basis,
            basis_matrix,
            basis_inverse,
            basic_values,
            values,
            basic_costs,
        })
    }

    /// Edge direction for bringing `entering` into the basis, given `u = B^-1 A_j`
    pub fn direction(&self, entering: usize, u: &[f64]) -> Vec<f64> {
        let mut d = vec![0.0; self.values.len()];
        for (&index, &ui) in self.basis.iter().zip(u) {
            d[index] = -ui;
        }
        d[entering] = 1.0;
        d
    }

    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    pub fn basis_matrix(&self) -> &[Vec<f64>] {
        &self.basis_matrix
    }

    pub fn basis_inverse(&self) -> &[Vec<f64>] {
        &self.basis_inverse
    }

    pub fn basic_values(&self) -> &[f64] {
        &self.basic_values
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn basic_costs(&self) -> &[f64] {
        &self.basic_costs
    }

    pub fn is_basic(&self, index: usize) -> bool {
        self.basis.contains(&index)
    }

    /// Indices in `[0, n)` not in the basis, ascending
    pub fn nonbasic(&self) -> Vec<usize> {
        (0..self.values.len()).filter(|&j| !self.is_basic(j)).collect()
    }

    /// Objective value `c'x` at the current solution
    pub fn cost(&self, problem: &Problem) -> f64 {
        problem.cost(&self.values)
    }

    /// Whether every basic value is nonnegative within `tolerance`
    pub fn is_feasible(&self, tolerance: f64) -> bool {
        self.basic_values.iter().all(|&v| v >= -tolerance)
    }
}

fn basic_costs(problem: &Problem, basis: &[usize]) -> Vec<f64> {
    basis.iter().map(|&j| problem.costs()[j]).collect()
}

/// B, B^-1 and xb for a basis
fn factor(
    problem: &Problem,
    basis: &[usize],
    tolerance: f64,
) -> SolveResult<(Vec<Vec<f64>>, Vec<Vec<f64>>, Vec<f64>)> {
    let basis_matrix = problem.submatrix(basis);
    let basis_inverse = linalg::invert(&basis_matrix, tolerance).ok_or_else(|| {
        SolveError::NumericInstability(format!("basis {:?} could not be inverted", basis))
    })?;

    verify_inverse(&basis_matrix, &basis_inverse, basis)?;

    let basic_values = linalg::mat_vec(&basis_inverse, problem.rhs());
    Ok((basis_matrix, basis_inverse, basic_values))
}

/// Rejects inverses with non-finite entries or a large `B * B^-1 - I`
fn verify_inverse(basis_matrix: &[Vec<f64>], basis_inverse: &[Vec<f64>], basis: &[usize]) -> SolveResult<()> {
    if basis_inverse.iter().flatten().any(|v| !v.is_finite()) {
        return Err(SolveError::NumericInstability(format!(
            "inverse of basis {:?} has non-finite entries",
            basis
        )));
    }
    let residual = linalg::identity_residual(basis_matrix, basis_inverse);
    if residual > INVERSE_RESIDUAL_LIMIT {
        return Err(SolveError::NumericInstability(format!(
            "inverse of basis {:?} is off by {:e}",
            basis, residual
        )));
    }
    Ok(())
}
