use rand::Rng;
use rand::seq::IndexedRandom;

use crate::linalg;
use crate::pricing::Pricing;
use crate::problem::Problem;
use crate::state::SolverState;

/// A pivot chosen by the ratio test
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    /// Index of the variable entering the basis
    pub entering: usize,
    /// Position in the basis ordering of the variable that leaves
    pub leaving_position: usize,
    /// Step length `theta_min`
    pub theta: f64,
    /// `u = B^-1 A_j`, one entry per basic position
    pub direction: Vec<f64>,
}

/// Outcome of the ratio test for one entering variable
#[derive(Debug, Clone, PartialEq)]
pub enum RatioTest {
    /// A basic variable blocks the step
    Step(Pivot),
    /// No entry of `u` is positive: the objective decreases without limit
    Unbounded { entering: usize, direction: Vec<f64> },
}

/// Picks the entering variable uniformly at random among all indices with a
/// reduced cost below `-tolerance`. Returns `None` at optimality.
pub fn choose_entering<R: Rng + ?Sized>(
    pricing: &Pricing,
    tolerance: f64,
    rng: &mut R,
) -> Option<usize> {
    pricing.improving(tolerance).choose(rng).copied()
}

/// Minimum-ratio test for `entering`.
///
/// Only positions with `u_i > tolerance` produce a ratio `xb_i / u_i`. Ties
/// on the minimum go to the lowest basic position.
pub fn ratio_test(problem: &Problem, state: &SolverState, entering: usize, tolerance: f64) -> RatioTest {
    let column = problem.column(entering);
    let direction = linalg::mat_vec(state.basis_inverse(), &column);

    let mut min_ratio = f64::INFINITY;
    let mut min_position = None;

    for (i, (&ui, &xi)) in direction.iter().zip(state.basic_values()).enumerate() {
        if ui > tolerance {
            let ratio = xi / ui;
            if min_position.is_none() || ratio < min_ratio {
                min_ratio = ratio;
                min_position = Some(i);
            }
        }
    }

    match min_position {
        Some(leaving_position) => RatioTest::Step(Pivot {
            entering,
            leaving_position,
            theta: min_ratio,
            direction,
        }),
        None => RatioTest::Unbounded { entering, direction },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::reduced_costs;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_single_step() {
        let problem = Problem::new(vec![-1.0, -1.0, 0.0], vec![vec![1.0, 1.0, 1.0]], vec![4.0]).unwrap();
        let state = SolverState::from_basis(&problem, vec![2], 1e-9).unwrap();

        let RatioTest::Step(pivot) = ratio_test(&problem, &state, 1, 1e-9) else {
            panic!("expected a step");
        };
        assert_eq!(pivot.entering, 1);
        assert_eq!(pivot.leaving_position, 0);
        assert_eq!(pivot.theta, 4.0);
        assert_eq!(pivot.direction, vec![1.0]);
    }

    #[test]
    fn test_unbounded_direction() {
        let problem = Problem::new(vec![-1.0, 0.0], vec![vec![-1.0, 1.0]], vec![1.0]).unwrap();
        let state = SolverState::from_basis(&problem, vec![1], 1e-9).unwrap();

        let result = ratio_test(&problem, &state, 0, 1e-9);
        assert_eq!(
            result,
            RatioTest::Unbounded {
                entering: 0,
                direction: vec![-1.0]
            }
        );
    }

    #[test]
    fn test_minimum_ratio_wins() {
        // Slack basis: xb = [6, 2, 9], u = A_0 = [2, 1, 0]
        // Ratios: 3 and 2; position 1 leaves
        let problem = Problem::new(
            vec![-1.0, 0.0, 0.0, 0.0],
            vec![
                vec![2.0, 1.0, 0.0, 0.0],
                vec![1.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0, 1.0],
            ],
            vec![6.0, 2.0, 9.0],
        )
        .unwrap();
        let state = SolverState::from_basis(&problem, vec![1, 2, 3], 1e-9).unwrap();

        let RatioTest::Step(pivot) = ratio_test(&problem, &state, 0, 1e-9) else {
            panic!("expected a step");
        };
        assert_eq!(pivot.leaving_position, 1);
        assert_eq!(pivot.theta, 2.0);
    }

    #[test]
    fn test_tie_goes_to_first_position() {
        // Basis ordered [3, 2]: both ratios are 2, position 0 (variable 3) leaves
        let problem = Problem::new(
            vec![-1.0, 0.0, 0.0, 0.0],
            vec![vec![1.0, 0.0, 1.0, 0.0], vec![2.0, 1.0, 0.0, 1.0]],
            vec![2.0, 4.0],
        )
        .unwrap();
        let state = SolverState::from_basis(&problem, vec![3, 2], 1e-9).unwrap();

        let RatioTest::Step(pivot) = ratio_test(&problem, &state, 0, 1e-9) else {
            panic!("expected a step");
        };
        assert_eq!(pivot.leaving_position, 0);
        assert_eq!(pivot.theta, 2.0);
        assert_eq!(state.basis()[pivot.leaving_position], 3);
    }

    #[test]
    fn test_degenerate_zero_ratio_is_kept() {
        let problem = Problem::new(
            vec![-1.0, 0.0, 0.0],
            vec![vec![1.0, 1.0, 0.0], vec![1.0, 0.0, 1.0]],
            vec![0.0, 3.0],
        )
        .unwrap();
        let state = SolverState::from_basis(&problem, vec![1, 2], 1e-9).unwrap();

        let RatioTest::Step(pivot) = ratio_test(&problem, &state, 0, 1e-9) else {
            panic!("expected a step");
        };
        assert_eq!(pivot.leaving_position, 0);
        assert_eq!(pivot.theta, 0.0);
    }

    #[test]
    fn test_entering_is_random_among_improving() {
        let problem = Problem::new(
            vec![-1.0, -2.0, -3.0, 0.0],
            vec![vec![1.0, 1.0, 1.0, 1.0]],
            vec![1.0],
        )
        .unwrap();
        let state = SolverState::from_basis(&problem, vec![3], 1e-9).unwrap();
        let pricing = reduced_costs(&problem, &state);

        let mut seen = [false; 4];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let j = choose_entering(&pricing, 1e-9, &mut rng).unwrap();
            seen[j] = true;
        }
        assert_eq!(seen, [true, true, true, false]);
    }

    #[test]
    fn test_entering_is_reproducible() {
        let problem = Problem::new(
            vec![-1.0, -2.0, -3.0, 0.0],
            vec![vec![1.0, 1.0, 1.0, 1.0]],
            vec![1.0],
        )
        .unwrap();
        let state = SolverState::from_basis(&problem, vec![3], 1e-9).unwrap();
        let pricing = reduced_costs(&problem, &state);

        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| choose_entering(&pricing, 1e-9, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(11), draw(11));
    }

    #[test]
    fn test_no_entering_at_optimum() {
        let problem = Problem::new(vec![1.0, 0.0], vec![vec![1.0, 1.0]], vec![1.0]).unwrap();
        let state = SolverState::from_basis(&problem, vec![1], 1e-9).unwrap();
        let pricing = reduced_costs(&problem, &state);

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(choose_entering(&pricing, 1e-9, &mut rng), None);
    }
}
