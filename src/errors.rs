//! Error types for the ClauseKit crate
//!
//! This module contains all error types that can be returned by ClauseKit operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClauseKitError {
    #[error("Expression error: {0}")]
    Expression(#[from] query_expression::ExpressionError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid query data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),
}
