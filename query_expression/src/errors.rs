use crate::validation::ValidationError;
use thiserror::Error;

pub type ExprResult<T> = Result<T, ExpressionError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Invalid operator: '{0}'")]
    InvalidOperator(String),

    #[error("Invalid function: '{0}'")]
    InvalidFunction(String),

    #[error("Invalid operand: '{0}' (expected AND or OR)")]
    InvalidOperand(String),

    #[error("Invalid order mode: '{0}'")]
    InvalidOrderMode(String),

    #[error("Invalid order direction: '{0}' (expected ASC or DESC)")]
    InvalidDirection(String),

    #[error("Invalid field identifier: {0}")]
    InvalidField(#[from] ValidationError),

    #[error("Empty property: no column to compile against")]
    EmptyProperty,

    #[error("Empty condition: custom expression requires a condition")]
    EmptyCondition,

    #[error("Missing value: operator '{operator}' requires a value")]
    MissingValue { operator: String },

    #[error("Empty values: ordering by values requires at least one scalar value")]
    EmptyValues,

    #[error("Non-scalar value: {0}")]
    NonScalarValue(String),

    #[error("Unexpected list value: operator '{operator}' compares against a single value")]
    UnexpectedList { operator: String },

    #[error("Ambiguous negation: a negating operator cannot be combined with fields")]
    AmbiguousNegation,

    #[error("Nesting too deep: filters nest beyond {max_depth} levels")]
    NestingTooDeep { max_depth: usize },
}
