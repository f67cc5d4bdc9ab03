//! Typed scalar values for SQL fragments
//!
//! This crate provides the value model shared by the clausekit workspace:
//! conversion from JSON input, and the literal text a dialect quotes.

pub mod json;
pub mod sql;
pub mod types;

pub use json::scalars_from_json;
pub use sql::{escape_string_literal, is_reserved_keyword, MAX_IDENTIFIER_LENGTH};
pub use types::ScalarValue;
