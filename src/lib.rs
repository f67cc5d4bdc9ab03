//! # ClauseKit
//!
//! A query expression compiler that turns filter trees, orderings and pagination
//! requests into safe SQL fragments for WHERE, ORDER BY and LIMIT clauses.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clausekit::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<(), ClauseKitError> {
//!     let config = AppConfig::load()?;
//!     let compiler = Compiler::new(config)?;
//!
//!     let compiled = compiler.compile_json(&json!({
//!         "filter": {
//!             "operand": "OR",
//!             "filters": [
//!                 {"property": "status", "operator": "=", "value": "published"},
//!                 {"property": "author_id", "operator": "IN", "value": [3, 7]}
//!             ]
//!         },
//!         "order": {"property": "created_at", "direction": "DESC"},
//!         "pagination": {"page": 2, "num_per_page": 25}
//!     }))?;
//!
//!     println!("SELECT * FROM posts {}", compiled.sql_suffix());
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::{CompiledQuery, Compiler};
pub use errors::ClauseKitError;

// Re-export centralized config
pub use config::{AppConfig, BindMode, CompilerConfig, PaginationConfig};

// Re-export internal crates that make up the public API
pub use query_expression;
pub use type_mapping;
