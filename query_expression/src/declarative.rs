//! Declarative construction
//!
//! Admin configuration and stored listings describe filters, orders and
//! pagination as plain data. This module defines that data shape and
//! translates it into expressions, validating every token on the way.

use crate::errors::{ExpressionError, ExprResult};
use crate::expression::{
    Conjunction, Direction, Filter, FilterNode, FilterValue, Function, Operator, Order,
    OrderMode, Pagination, Predicate,
};
use crate::validation::FieldName;
use config::PaginationConfig;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use type_mapping::{scalars_from_json, ScalarValue};

/// Default limit on nested filter levels
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A single item or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item).iter(),
            OneOrMany::Many(items) => items.iter(),
        }
    }
}

/// Entry of a `filters` list: a nested filter or an opaque SQL fragment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterEntry {
    Nested(FilterData),
    Fragment(String),
}

impl<'de> Deserialize<'de> for FilterEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(sql) => Ok(FilterEntry::Fragment(sql)),
            value => from_object(value, "filter entry").map(FilterEntry::Nested),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterData {
    pub active: Option<bool>,
    pub condition: Option<String>,
    pub filters: Vec<FilterEntry>,
    #[serde(alias = "fields")]
    pub property: Option<OneOrMany<String>>,
    pub value: Option<Value>,
    pub operator: Option<String>,
    #[serde(alias = "function")]
    pub func: Option<String>,
    #[serde(alias = "conjunction")]
    pub operand: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderData {
    pub active: Option<bool>,
    pub condition: Option<String>,
    pub mode: Option<String>,
    #[serde(alias = "fields")]
    pub property: Option<OneOrMany<String>>,
    pub values: Vec<Value>,
    pub direction: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationData {
    pub active: Option<bool>,
    pub page: Option<u64>,
    pub num_per_page: Option<u64>,
}

/// Everything a listing needs: one filter tree, any number of orders, one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryData {
    /// A filter object, or a list of entries combined with AND
    #[serde(alias = "filters", deserialize_with = "filter_or_entries")]
    pub filter: Option<FilterData>,
    #[serde(alias = "orders", deserialize_with = "order_or_orders")]
    pub order: Option<OneOrMany<OrderData>>,
    #[serde(deserialize_with = "pagination_object")]
    pub pagination: Option<PaginationData>,
}

/// Deserialize a data struct only from a JSON object
///
/// serde also accepts structs written as sequences, which would read a list
/// field by field in declaration order.
fn from_object<T, E>(value: Value, what: &str) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    match value {
        Value::Object(_) => T::deserialize(value).map_err(E::custom),
        other => Err(E::custom(format!(
            "{} must be an object, found {}",
            what,
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn filter_or_entries<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<FilterData>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Array(items) => {
            let filters = items
                .into_iter()
                .map(|item| {
                    FilterEntry::deserialize(item).map_err(<D::Error as de::Error>::custom)
                })
                .collect::<Result<Vec<_>, D::Error>>()?;
            Ok(Some(FilterData {
                filters,
                ..FilterData::default()
            }))
        }
        value => from_object(value, "filter").map(Some),
    }
}

fn order_or_orders<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<OneOrMany<OrderData>>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Array(items) => {
            let orders = items
                .into_iter()
                .map(|item| from_object(item, "order"))
                .collect::<Result<Vec<_>, D::Error>>()?;
            Ok(Some(OneOrMany::Many(orders)))
        }
        value => from_object(value, "order").map(|order| Some(OneOrMany::One(order))),
    }
}

fn pagination_object<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<PaginationData>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => from_object(value, "pagination").map(Some),
    }
}

/// Parse an optional token, treating blank input as absent
fn parse_token<T>(token: Option<&String>) -> ExprResult<Option<T>>
where
    T: FromStr<Err = ExpressionError>,
{
    match token.map(|t| t.trim()).filter(|t| !t.is_empty()) {
        Some(token) => token.parse().map(Some),
        None => Ok(None),
    }
}

fn parse_fields(property: Option<&OneOrMany<String>>) -> ExprResult<Vec<FieldName>> {
    let Some(property) = property else {
        return Ok(Vec::new());
    };
    property
        .iter()
        .map(|name| FieldName::new(name.trim()).map_err(ExpressionError::from))
        .collect()
}

fn scalar_or_error(value: &Value) -> ExprResult<ScalarValue> {
    ScalarValue::from_json(value)
        .ok_or_else(|| ExpressionError::NonScalarValue(value.to_string()))
}

fn parse_value(value: Option<&Value>) -> ExprResult<Option<FilterValue>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => {
            let values = items
                .iter()
                .map(scalar_or_error)
                .collect::<ExprResult<Vec<_>>>()?;
            Ok(Some(FilterValue::List(values)))
        }
        Some(other) => Ok(Some(FilterValue::Single(scalar_or_error(other)?))),
    }
}

impl Filter {
    /// Build a filter tree from declarative data
    pub fn from_data(data: &FilterData) -> ExprResult<Self> {
        Self::from_data_with_depth(data, DEFAULT_MAX_DEPTH)
    }

    /// Build a filter tree, rejecting more than `max_depth` nested levels
    pub fn from_data_with_depth(data: &FilterData, max_depth: usize) -> ExprResult<Self> {
        translate_filter(data, 1, max_depth)
    }
}

fn translate_filter(data: &FilterData, depth: usize, max_depth: usize) -> ExprResult<Filter> {
    if depth > max_depth {
        return Err(ExpressionError::NestingTooDeep { max_depth });
    }

    let operator: Option<Operator> = parse_token(data.operator.as_ref())?;
    let function: Option<Function> = parse_token(data.func.as_ref())?;
    let conjunction = parse_token::<Conjunction>(data.operand.as_ref())?.unwrap_or_default();
    let fields = parse_fields(data.property.as_ref())?;
    let negate = operator.is_some_and(|op| op.is_negating());

    let condition = data.condition.as_deref().unwrap_or_default();

    let node = if !data.filters.is_empty() {
        let mut filters = Vec::with_capacity(data.filters.len());
        for entry in &data.filters {
            let child = match entry {
                FilterEntry::Nested(child) => translate_filter(child, depth + 1, max_depth)?,
                FilterEntry::Fragment(sql) if sql.is_empty() => Filter::new(),
                FilterEntry::Fragment(sql) => Filter::raw(sql.clone()),
            };
            filters.push(child);
        }
        FilterNode::Group {
            filters,
            conjunction,
            negate,
        }
    } else if !condition.is_empty() {
        FilterNode::Raw {
            condition: condition.to_string(),
            negate,
        }
    } else if !fields.is_empty() {
        if negate {
            return Err(ExpressionError::AmbiguousNegation);
        }
        let value = parse_value(data.value.as_ref())?;
        let predicate = Predicate::new(fields, operator.unwrap_or_default(), value)
            .with_function(function);
        FilterNode::Predicate(predicate)
    } else {
        FilterNode::Empty
    };

    tracing::trace!("[DECLARATIVE] filter at depth {} -> {:?}", depth, node_kind(&node));

    Ok(Filter::from_node(node).set_active(data.active.unwrap_or(true)))
}

fn node_kind(node: &FilterNode) -> &'static str {
    match node {
        FilterNode::Empty => "empty",
        FilterNode::Group { .. } => "group",
        FilterNode::Raw { .. } => "raw",
        FilterNode::Predicate(_) => "predicate",
    }
}

impl Order {
    /// Build an order from declarative data; non-scalar values are dropped
    pub fn from_data(data: &OrderData) -> ExprResult<Self> {
        let mode: Option<OrderMode> = parse_token(data.mode.as_ref())?;
        let direction: Option<Direction> = parse_token(data.direction.as_ref())?;
        let fields = parse_fields(data.property.as_ref())?;
        let values = scalars_from_json(&data.values);

        if values.len() != data.values.len() {
            tracing::debug!(
                "[DECLARATIVE] dropped {} non-scalar order values",
                data.values.len() - values.len()
            );
        }

        let mut order = Order::new()
            .with_mode(mode)
            .with_fields(fields)
            .with_values(values)
            .with_direction(direction)
            .set_active(data.active.unwrap_or(true));
        if let Some(condition) = &data.condition {
            order = order.with_condition(condition.clone());
        }
        Ok(order)
    }
}

impl Pagination {
    /// Build pagination from declarative data; page defaults to 1, size to unbounded
    pub fn from_data(data: &PaginationData) -> Self {
        Pagination::new(data.page.unwrap_or(1), data.num_per_page.unwrap_or(0))
            .set_active(data.active.unwrap_or(true))
    }

    /// Build pagination, applying configured page-size default and cap
    pub fn from_data_with_config(data: &PaginationData, config: &PaginationConfig) -> Self {
        Pagination::new(
            data.page.unwrap_or(1),
            config.effective_num_per_page(data.num_per_page),
        )
        .set_active(data.active.unwrap_or(true))
    }
}
