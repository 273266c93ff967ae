/// The terminal result record of a solve
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Solution vector x; the last vertex visited when unbounded, empty when no basis was found
    pub values: Vec<f64>,
    /// Objective value c'x; negative infinity when unbounded, `None` when no basis was found
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_objective"))]
    pub objective_value: Option<f64>,
    /// Final basic indices, in basis order
    pub basis: Vec<usize>,
    /// Reduced costs at the final basis
    pub reduced_costs: Vec<f64>,
    /// Simplex multipliers at the final basis
    pub duals: Vec<f64>,
    /// Ray along which the objective decreases without limit (unbounded only)
    pub ray: Option<Vec<f64>>,
    /// Number of pivots performed
    pub iterations: usize,
    /// Whether the random starting basis had nonnegative basic values
    pub feasible_start: bool,
    /// Random subsets tried by an exhausted basis search (basis not found only)
    pub attempts: Option<usize>,
    /// Problem description, if any
    pub description: Option<String>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// No nonbasic variable has a negative reduced cost
    Optimal,
    /// The objective decreases without limit along `ray`
    Unbounded,
    /// The random search never found a nonsingular basis
    BasisNotFound,
    /// The configured iteration cap stopped the loop
    IterationLimit,
}

impl Solution {
    /// The record reported when the initial basis search is exhausted
    pub fn basis_not_found(attempts: usize, description: Option<String>) -> Self {
        Self {
            status: SolutionStatus::BasisNotFound,
            values: Vec::new(),
            objective_value: None,
            basis: Vec::new(),
            reduced_costs: Vec::new(),
            duals: Vec::new(),
            ray: None,
            iterations: 0,
            feasible_start: false,
            attempts: Some(attempts),
            description,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}

/// JSON has no infinities; an unbounded objective is written as `"-inf"`
#[cfg(feature = "serde")]
fn serialize_objective<S: serde::Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match *value {
        Some(v) if v == f64::NEG_INFINITY => serializer.serialize_str("-inf"),
        Some(v) if v == f64::INFINITY => serializer.serialize_str("inf"),
        Some(v) => serializer.serialize_f64(v),
        None => serializer.serialize_none(),
    }
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SolutionStatus::Optimal => "OPTIMAL",
            SolutionStatus::Unbounded => "UNBOUNDED",
            SolutionStatus::BasisNotFound => "BASIS NOT FOUND",
            SolutionStatus::IterationLimit => "ITERATION LIMIT",
        };
        f.write_str(label)
    }
}
