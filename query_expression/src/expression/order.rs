//! Order expressions
//!
//! An order resolves to exactly one strategy: random, a raw custom clause,
//! explicit value ordering through `FIELD()`, or plain property/direction
//! ordering. An explicit mode wins; otherwise the first populated input does.

use super::base::Expression;
use super::operator::{Direction, OrderMode};
use crate::errors::{ExpressionError, ExprResult};
use crate::render::FragmentWriter;
use crate::validation::FieldName;
use type_mapping::ScalarValue;

/// ORDER BY fragment compiler
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    active: bool,
    mode: Option<OrderMode>,
    condition: Option<String>,
    fields: Vec<FieldName>,
    values: Vec<ScalarValue>,
    direction: Option<Direction>,
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

impl Order {
    pub fn new() -> Self {
        Self {
            active: true,
            mode: None,
            condition: None,
            fields: Vec::new(),
            values: Vec::new(),
            direction: None,
        }
    }

    /// Order by a property in the given direction
    pub fn by(field: &str, direction: Direction) -> ExprResult<Self> {
        Ok(Self::new()
            .with_field(field)?
            .with_direction(Some(direction)))
    }

    pub fn random() -> Self {
        Self::new().with_mode(Some(OrderMode::Random))
    }

    /// Raw trusted ORDER BY body
    pub fn custom(condition: impl Into<String>) -> Self {
        Self::new()
            .with_mode(Some(OrderMode::Custom))
            .with_condition(condition)
    }

    /// Order rows of `field` by the position of their value in `values`
    pub fn by_values<V: Into<ScalarValue>>(field: &str, values: Vec<V>) -> ExprResult<Self> {
        Ok(Self::new()
            .with_mode(Some(OrderMode::Values))
            .with_field(field)?
            .with_values(values.into_iter().map(Into::into).collect()))
    }

    pub fn with_mode(mut self, mode: Option<OrderMode>) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_field(mut self, field: &str) -> ExprResult<Self> {
        self.fields.push(FieldName::new(field)?);
        Ok(self)
    }

    pub fn with_fields(mut self, fields: Vec<FieldName>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_values(mut self, values: Vec<ScalarValue>) -> Self {
        self.values = values;
        self
    }

    pub fn with_direction(mut self, direction: Option<Direction>) -> Self {
        self.direction = direction;
        self
    }

    pub fn set_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn mode(&self) -> Option<OrderMode> {
        self.mode
    }

    pub fn fields(&self) -> &[FieldName] {
        &self.fields
    }

    pub fn values(&self) -> &[ScalarValue] {
        &self.values
    }

    pub fn has_values(&self) -> bool {
        !self.values.is_empty()
    }

    pub fn has_property(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Explicit direction, else the one implied by an ASC/DESC mode
    pub fn direction(&self) -> Option<Direction> {
        self.direction
            .or_else(|| self.mode.and_then(|mode| mode.direction()))
    }

    fn direction_suffix(&self) -> String {
        match self.direction() {
            Some(direction) => format!(" {}", direction.to_sql()),
            None => String::new(),
        }
    }

    fn compile_custom(&self) -> ExprResult<String> {
        match self.condition.as_deref() {
            Some(condition) if !condition.is_empty() => Ok(condition.to_string()),
            _ => Err(ExpressionError::EmptyCondition),
        }
    }

    fn compile_values(&self, writer: &mut FragmentWriter<'_>) -> ExprResult<String> {
        if self.fields.is_empty() {
            return Err(ExpressionError::EmptyProperty);
        }
        if self.values.is_empty() {
            return Err(ExpressionError::EmptyValues);
        }

        let suffix = self.direction_suffix();
        let mut clauses = Vec::new();
        for column in writer.columns(&self.fields)? {
            let literals: Vec<String> = self.values.iter().map(|v| writer.literal(v)).collect();
            clauses.push(format!(
                "{}{}",
                writer.dialect().field_order(&column, &literals),
                suffix
            ));
        }
        Ok(clauses.join(", "))
    }

    fn compile_property(&self, writer: &mut FragmentWriter<'_>) -> ExprResult<String> {
        let suffix = self.direction_suffix();
        let clauses: Vec<String> = writer
            .columns(&self.fields)?
            .into_iter()
            .map(|column| format!("{}{}", column, suffix))
            .collect();
        Ok(clauses.join(", "))
    }
}

impl Expression for Order {
    fn is_active(&self) -> bool {
        self.active
    }

    fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    fn compile(&self, writer: &mut FragmentWriter<'_>) -> ExprResult<String> {
        if !self.active {
            return Ok(String::new());
        }

        tracing::trace!("[ORDER] mode {:?}, {} fields", self.mode, self.fields.len());

        match self.mode {
            Some(OrderMode::Random) => Ok(writer.dialect().random_order().to_string()),
            Some(OrderMode::Custom) => self.compile_custom(),
            Some(OrderMode::Values) => self.compile_values(writer),
            Some(OrderMode::Asc) | Some(OrderMode::Desc) | None => {
                if self.has_condition() {
                    self.compile_custom()
                } else if self.has_values() {
                    self.compile_values(writer)
                } else if self.has_property() {
                    self.compile_property(writer)
                } else {
                    Ok(String::new())
                }
            }
        }
    }
}
