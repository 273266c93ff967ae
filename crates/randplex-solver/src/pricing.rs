use crate::linalg;
use crate::problem::Problem;
use crate::state::SolverState;

/// Reduced costs for one basis
#[derive(Debug, Clone, PartialEq)]
pub struct Pricing {
    /// Length n; exactly 0 at basic indices, `c_j - cb' B^-1 A_j` elsewhere
    pub reduced_costs: Vec<f64>,
    /// Simplex multipliers `y' = cb' B^-1` (length m)
    pub duals: Vec<f64>,
}

impl Pricing {
    /// Nonbasic indices whose reduced cost is below `-tolerance`, ascending
    pub fn improving(&self, tolerance: f64) -> Vec<usize> {
        self.reduced_costs
            .iter()
            .enumerate()
            .filter(|&(_, &rc)| rc < -tolerance)
            .map(|(j, _)| j)
            .collect()
    }

    /// True when no reduced cost is below `-tolerance`
    pub fn is_optimal(&self, tolerance: f64) -> bool {
        self.reduced_costs.iter().all(|&rc| rc >= -tolerance)
    }
}

/// Prices every nonbasic column against the current basis.
///
/// When every variable is basic (m == n) the vector is all zeros and the
/// current solution is optimal.
pub fn reduced_costs(problem: &Problem, state: &SolverState) -> Pricing {
    let duals = linalg::vec_mat(state.basic_costs(), state.basis_inverse());
    let mut reduced_costs = vec![0.0; problem.num_variables()];

    for j in state.nonbasic() {
        let column = problem.column(j);
        reduced_costs[j] = problem.costs()[j] - linalg::dot(&duals, &column);
    }

    Pricing {
        reduced_costs,
        duals,
    }
}
