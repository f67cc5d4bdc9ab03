//! Expression compilers
//!
//! Filter, order and pagination expressions compile into SQL fragments for
//! WHERE, ORDER BY and LIMIT clauses.

pub mod base;
pub mod filter;
pub mod operator;
pub mod order;
pub mod pagination;


pub use base::{CustomExpression, Expression};
pub use filter::{Filter, FilterNode, FilterValue, Predicate};
pub use operator::{Conjunction, Direction, Function, Operator, OperatorArity, OrderMode};
pub use order::Order;
pub use pagination::Pagination;
