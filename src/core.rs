//! Core ClauseKit functionality
//!
//! This module contains the `Compiler` facade, which binds a configuration to a
//! dialect and a field resolver and compiles declarative query data into
//! WHERE, ORDER BY and LIMIT fragments in one pass.

use query_expression::{
    dialect_by_name, Dialect, Expression, FieldResolver, Filter, FilterData, Fragment, Order,
    OrderData, Pagination, PaginationData, PlainResolver, QueryData, RenderContext,
    TableAliasResolver,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use type_mapping::ScalarValue;

use crate::{debug_log, trace_log};
use crate::errors::ClauseKitError;
use config::AppConfig;

/// Compiled clause bodies plus the values bound to their placeholders
///
/// Each clause is empty when it compiled to nothing. `params` is empty in
/// inline mode and otherwise lists values in WHERE, ORDER BY, LIMIT order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub where_clause: String,
    pub order_clause: String,
    pub limit_clause: String,
    pub params: Vec<ScalarValue>,
}

impl CompiledQuery {
    pub fn is_empty(&self) -> bool {
        self.where_clause.is_empty() && self.order_clause.is_empty() && self.limit_clause.is_empty()
    }

    /// `WHERE .. ORDER BY .. LIMIT ..` tail for appending to a SELECT
    pub fn sql_suffix(&self) -> String {
        let mut parts = Vec::new();
        if !self.where_clause.is_empty() {
            parts.push(format!("WHERE {}", self.where_clause));
        }
        if !self.order_clause.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_clause));
        }
        if !self.limit_clause.is_empty() {
            parts.push(self.limit_clause.clone());
        }
        parts.join(" ")
    }
}

/// Main ClauseKit entry point that compiles declarative query data
#[derive(Debug)]
pub struct Compiler {
    config: AppConfig,
    dialect: Box<dyn Dialect>,
    resolver: Box<dyn FieldResolver>,
}

impl Compiler {
    /// Create a compiler for the configured dialect and default table alias
    pub fn new(config: AppConfig) -> Result<Self, ClauseKitError> {
        config.validate()?;

        let dialect = dialect_by_name(&config.compiler.dialect)
            .ok_or_else(|| ClauseKitError::UnsupportedDialect(config.compiler.dialect.clone()))?;

        let alias = config.compiler.default_table_alias.as_str();
        let resolver: Box<dyn FieldResolver> = if alias.is_empty() {
            Box::new(PlainResolver)
        } else {
            let resolver = TableAliasResolver::new(alias)
                .map_err(query_expression::ExpressionError::from)?;
            Box::new(resolver)
        };

        debug_log!(
            "[COMPILER] dialect {}, alias '{}', bind mode {:?}",
            dialect.name(),
            alias,
            config.compiler.bind_mode
        );

        Ok(Self {
            config,
            dialect,
            resolver,
        })
    }

    /// Replace the field resolver, e.g. with a `PropertyMap` for multilingual columns
    pub fn with_resolver<R: FieldResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Render context for compiling typed expressions directly
    pub fn context(&self) -> RenderContext<'_> {
        RenderContext::new(self.dialect.as_ref(), self.resolver.as_ref())
    }

    fn render(&self, expression: &dyn Expression) -> Result<Fragment, ClauseKitError> {
        Ok(expression.render(&self.context(), self.config.compiler.bind_mode)?)
    }

    pub fn compile_filter(&self, data: &FilterData) -> Result<Fragment, ClauseKitError> {
        let filter = Filter::from_data_with_depth(data, self.config.compiler.max_nesting_depth)?;
        self.render(&filter)
    }

    pub fn compile_order(&self, data: &OrderData) -> Result<Fragment, ClauseKitError> {
        let order = Order::from_data(data)?;
        self.render(&order)
    }

    /// Page size falls back to the configured default and is capped at the maximum
    pub fn compile_pagination(&self, data: &PaginationData) -> Result<Fragment, ClauseKitError> {
        let pagination = Pagination::from_data_with_config(data, &self.config.pagination);
        self.render(&pagination)
    }

    /// Compile every present section; absent sections yield empty clauses
    pub fn compile(&self, query: &QueryData) -> Result<CompiledQuery, ClauseKitError> {
        let mut compiled = CompiledQuery::default();

        if let Some(filter) = &query.filter {
            let fragment = self.compile_filter(filter)?;
            compiled.where_clause = fragment.sql;
            compiled.params.extend(fragment.params);
        }

        if let Some(orders) = &query.order {
            let mut clauses = Vec::new();
            for order in orders.iter() {
                let fragment = self.compile_order(order)?;
                trace_log!("[COMPILER] order -> '{}'", fragment.sql);
                if !fragment.is_empty() {
                    clauses.push(fragment.sql);
                    compiled.params.extend(fragment.params);
                }
            }
            compiled.order_clause = clauses.join(", ");
        }

        if let Some(pagination) = &query.pagination {
            let fragment = self.compile_pagination(pagination)?;
            compiled.limit_clause = fragment.sql;
            compiled.params.extend(fragment.params);
        }

        debug_log!(
            "[COMPILER] compiled query with {} bound values",
            compiled.params.len()
        );

        Ok(compiled)
    }

    /// Deserialize a JSON query document and compile it
    pub fn compile_json(&self, value: &Value) -> Result<CompiledQuery, ClauseKitError> {
        let query = QueryData::deserialize(value)?;
        self.compile(&query)
    }
}
