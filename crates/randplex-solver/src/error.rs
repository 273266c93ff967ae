use thiserror::Error;

/// Failures that stop a solve before it reaches a terminal status
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("Non-finite value in {what} at index {index}")]
    NonFiniteInput { what: &'static str, index: usize },
    #[error("No nonsingular basis found after {attempts} attempts")]
    BasisNotFound { attempts: usize },
    #[error("Numeric instability: {0}")]
    NumericInstability(String),
    #[error("Invalid solver option: {0}")]
    InvalidOption(String),
}

pub type SolveResult<T> = Result<T, SolveError>;
