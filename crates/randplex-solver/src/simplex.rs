use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::basis::{self, DEFAULT_MAX_ATTEMPTS};
use crate::error::{SolveError, SolveResult};
use crate::pivot::{self, RatioTest};
use crate::pricing::{self, Pricing};
use crate::problem::Problem;
use crate::solution::{Solution, SolutionStatus};
use crate::state::SolverState;

/// Primal simplex solver with a random starting basis and random entering
/// variable selection
#[derive(Debug, Clone)]
pub struct Solver {
    /// Random subsets tried when searching for the starting basis
    max_attempts: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
    /// Optional cap on the number of pivots
    max_iterations: Option<usize>,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            tolerance: 1e-9,
            max_iterations: None,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max: usize) -> Self {
        self.max_attempts = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// `None` lets the pivot loop run until it terminates on its own
    pub fn with_max_iterations(mut self, max: Option<usize>) -> Self {
        self.max_iterations = max;
        self
    }

    /// Solve with a `StdRng` seeded from `seed`; equal seeds give equal pivot sequences
    pub fn solve_seeded(&self, problem: &Problem, seed: u64) -> SolveResult<Solution> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.solve(problem, &mut rng)
    }

    /// Run the simplex method.
    ///
    /// `rng` is the single random stream shared by the basis search and the
    /// entering variable draws.
    pub fn solve<R: Rng + ?Sized>(&self, problem: &Problem, rng: &mut R) -> SolveResult<Solution> {
        self.validate()?;

        let mut state = basis::start_basis(problem, rng, self.max_attempts, self.tolerance)?;
        let feasible_start = state.is_feasible(self.tolerance);
        let mut iterations = 0;

        loop {
            let pricing = pricing::reduced_costs(problem, &state);

            let Some(entering) = pivot::choose_entering(&pricing, self.tolerance, rng) else {
                info!(iterations, objective = state.cost(problem), "optimal");
                return Ok(self.report(
                    problem,
                    state,
                    pricing,
                    SolutionStatus::Optimal,
                    None,
                    iterations,
                    feasible_start,
                ));
            };

            if self.max_iterations.is_some_and(|max| iterations >= max) {
                warn!(iterations, "iteration limit reached before optimality");
                return Ok(self.report(
                    problem,
                    state,
                    pricing,
                    SolutionStatus::IterationLimit,
                    None,
                    iterations,
                    feasible_start,
                ));
            }

            match pivot::ratio_test(problem, &state, entering, self.tolerance) {
                RatioTest::Step(step) => {
                    debug!(
                        iteration = iterations,
                        entering,
                        reduced_cost = pricing.reduced_costs[entering],
                        theta = step.theta,
                        "pivoting"
                    );
                    state = state.change_basis(problem, &step, self.tolerance)?;
                    iterations += 1;
                }
                RatioTest::Unbounded { entering, direction } => {
                    info!(iterations, entering, "unbounded");
                    let ray = state.direction(entering, &direction);
                    return Ok(self.report(
                        problem,
                        state,
                        pricing,
                        SolutionStatus::Unbounded,
                        Some(ray),
                        iterations,
                        feasible_start,
                    ));
                }
            }
        }
    }

    fn validate(&self) -> SolveResult<()> {
        if !(self.tolerance >= 0.0) || !self.tolerance.is_finite() {
            return Err(SolveError::InvalidOption(format!(
                "tolerance must be a finite nonnegative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn report(
        &self,
        problem: &Problem,
        state: SolverState,
        pricing: Pricing,
        status: SolutionStatus,
        ray: Option<Vec<f64>>,
        iterations: usize,
        feasible_start: bool,
    ) -> Solution {
        let objective_value = match status {
            SolutionStatus::Unbounded => f64::NEG_INFINITY,
            _ => state.cost(problem),
        };

        Solution {
            status,
            values: state.values().to_vec(),
            objective_value: Some(objective_value),
            basis: state.basis().to_vec(),
            reduced_costs: pricing.reduced_costs,
            duals: pricing.duals,
            ray,
            iterations,
            feasible_start,
            attempts: None,
            description: problem.description().map(str::to_string),
        }
    }
}
