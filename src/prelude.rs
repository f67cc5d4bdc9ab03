//! Convenience re-exports for common ClauseKit usage
//!
//! This prelude module re-exports the most commonly used items from the ClauseKit crates,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use clausekit::prelude::*;
//!
//! let filter = Filter::eq("status", "published").unwrap();
//! let sql = filter.sql(&RenderContext::new(&MySqlDialect, &PlainResolver)).unwrap();
//! assert_eq!(sql, "status = 'published'");
//! ```

// Core ClauseKit components
pub use crate::core::{CompiledQuery, Compiler};
pub use crate::errors::ClauseKitError;

// Re-export centralized config
pub use config::{AppConfig, BindMode, CompilerConfig, PaginationConfig};

// Re-export commonly used expression types for convenience
pub use query_expression::prelude::*;

// Common external dependencies
pub use serde_json;
