//! Convenience re-exports for common query-expression usage

// Expression kinds and the shared contract
pub use crate::expression::{
    Conjunction, CustomExpression, Direction, Expression, Filter, FilterValue, Function, Operator,
    Order, OrderMode, Pagination, Predicate,
};

// Declarative input
pub use crate::declarative::{FilterData, OrderData, PaginationData, QueryData};

// Rendering
pub use crate::dialect::{Dialect, MySqlDialect};
pub use crate::render::{Fragment, RenderContext};
pub use crate::resolver::{FieldResolver, PlainResolver, PropertyMap, TableAliasResolver};
pub use config::BindMode;

// Errors and validation
pub use crate::errors::ExpressionError;
pub use crate::validation::{FieldName, ValidationError};

pub use type_mapping::ScalarValue;
