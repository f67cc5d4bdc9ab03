//! Query Expression - SQL fragment compiler for ClauseKit
//!
//! This crate turns filter trees, orderings and pagination requests
//! into WHERE, ORDER BY and LIMIT fragments. Field names are validated, values
//! are quoted or bound through the active dialect, and vendor specific forms
//! live behind the `Dialect` trait.

pub mod declarative;
pub mod dialect;
pub mod errors;
pub mod expression;
pub mod prelude;
pub mod render;
pub mod resolver;
pub mod validation;

pub use config::BindMode;
pub use declarative::{FilterData, FilterEntry, OneOrMany, OrderData, PaginationData, QueryData};
pub use dialect::{dialect_by_name, Dialect, MySqlDialect};
pub use errors::{ExprResult, ExpressionError};
pub use expression::{
    Conjunction, CustomExpression, Direction, Expression, Filter, FilterNode, FilterValue,
    Function, Operator, Order, OrderMode, Pagination, Predicate,
};
pub use render::{Fragment, FragmentWriter, RenderContext};
pub use resolver::{FieldResolver, PlainResolver, PropertyMap, TableAliasResolver};
pub use validation::{FieldName, ValidationError};
