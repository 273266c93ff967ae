mod basis;
mod error;
mod linalg;
mod pivot;
mod pricing;
mod problem;
mod simplex;
mod solution;
mod state;

pub use basis::{DEFAULT_MAX_ATTEMPTS, start_basis};
pub use error::{SolveError, SolveResult};
pub use pivot::{Pivot, RatioTest, choose_entering, ratio_test};
pub use pricing::{Pricing, reduced_costs};
pub use problem::Problem;
pub use simplex::Solver;
pub use solution::{Solution, SolutionStatus};
pub use state::SolverState;
