use rand::Rng;
use rand::seq::index;
use tracing::{debug, warn};

use crate::error::{SolveError, SolveResult};
use crate::linalg;
use crate::problem::Problem;
use crate::state::SolverState;

/// Default number of random subsets tried before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Draws random m-column subsets of A until one is nonsingular.
///
/// Each attempt samples m distinct indices from `[0, n)` without replacement;
/// subsets that failed before may be drawn again. The resulting basic
/// solution is not required to be nonnegative.
pub fn start_basis<R: Rng + ?Sized>(
    problem: &Problem,
    rng: &mut R,
    max_attempts: usize,
    tolerance: f64,
) -> SolveResult<SolverState> {
    let n = problem.num_variables();
    let m = problem.num_constraints();

    for attempt in 1..=max_attempts {
        let candidate = index::sample(rng, n, m).into_vec();
        let submatrix = problem.submatrix(&candidate);

        if linalg::rank(&submatrix, tolerance) == m {
            debug!(attempt, basis = ?candidate, "found nonsingular basis");
            let state = SolverState::from_basis(problem, candidate, tolerance)?;
            if !state.is_feasible(tolerance) {
                warn!(
                    basis = ?state.basis(),
                    "initial basis has negative basic values; continuing from an infeasible start"
                );
            }
            return Ok(state);
        }

        debug!(attempt, basis = ?candidate, "candidate basis is singular");
    }

    Err(SolveError::BasisNotFound {
        attempts: max_attempts,
    })
}
