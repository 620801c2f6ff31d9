//! Error types for the damage models.

use crate::interfaces::Q;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DamageError {
    /// A material parameter is outside of the range the formulas allow.
    #[error("Invalid material parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Missing material parameter: {0}")]
    MissingParameter(String),

    /// Integration point index outside of `[0, n)`.
    #[error("Integration point {index} is out of bounds for {n} points")]
    IndexOutOfBounds { index: usize, n: usize },

    #[error("Missing input quantity: {0}")]
    MissingInput(Q),

    /// A flattened input does not hold `n` blocks of the declared size.
    #[error("Input {q} has {actual} values, expected {expected}")]
    InputLength {
        q: Q,
        expected: usize,
        actual: usize,
    },

    #[error("Quantity {0} is not an output of this model")]
    UnknownOutput(Q),

    #[error("Unknown quantity: {0}")]
    UnknownQuantity(String),

    #[error("Unknown constraint: {0}")]
    UnknownConstraint(String),
}

pub type DamageResult<T> = Result<T, DamageError>;
