//! Filter expressions
//!
//! A filter is a boolean tree: groups of child filters joined by a
//! conjunction, raw trusted conditions, and leaf predicates comparing one or
//! more fields against a value. Each variant may be negated where that is
//! meaningful; a leaf negates through its operator instead.

use super::base::Expression;
use super::operator::{Conjunction, Function, Operator, OperatorArity};
use crate::errors::{ExpressionError, ExprResult};
use crate::render::{compile_conditions, FragmentWriter};
use crate::validation::FieldName;
use type_mapping::ScalarValue;

/// Value a predicate compares against
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Single(ScalarValue),
    List(Vec<ScalarValue>),
}

impl FilterValue {
    pub fn single(value: impl Into<ScalarValue>) -> Self {
        FilterValue::Single(value.into())
    }

    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ScalarValue>,
    {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Leaf comparison: `[FUNCTION(]column[)] <operator> <value>` for every field
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    fields: Vec<FieldName>,
    operator: Operator,
    function: Option<Function>,
    value: Option<FilterValue>,
}

impl Predicate {
    pub fn new(fields: Vec<FieldName>, operator: Operator, value: Option<FilterValue>) -> Self {
        Self {
            fields,
            operator,
            function: None,
            value,
        }
    }

    pub fn with_function(mut self, function: Option<Function>) -> Self {
        self.function = function;
        self
    }

    pub fn fields(&self) -> &[FieldName] {
        &self.fields
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn function(&self) -> Option<Function> {
        self.function
    }

    pub fn value(&self) -> Option<&FilterValue> {
        self.value.as_ref()
    }

    /// One condition per resolved column, always OR-joined
    fn compile(&self, writer: &mut FragmentWriter<'_>) -> ExprResult<String> {
        let columns = writer.columns(&self.fields)?;

        let mut conditions = Vec::with_capacity(columns.len());
        for column in columns {
            let target = match self.function {
                Some(function) => writer.dialect().call_function(function, &column),
                None => column,
            };
            conditions.push(self.compile_target(&target, writer)?);
        }

        Ok(compile_conditions(conditions, Conjunction::Or.to_sql()))
    }

    fn compile_target(&self, target: &str, writer: &mut FragmentWriter<'_>) -> ExprResult<String> {
        let operator = self.operator.to_sql();

        match self.operator.arity() {
            OperatorArity::Unary => Ok(format!("{} {}", target, operator)),
            OperatorArity::SetMembership => {
                let list = match self.required_value()? {
                    FilterValue::Single(value) => value.clone(),
                    FilterValue::List(values) => ScalarValue::Text(
                        values
                            .iter()
                            .map(ScalarValue::to_literal_text)
                            .collect::<Vec<_>>()
                            .join(","),
                    ),
                };
                let list = writer.literal(&list);
                Ok(writer.dialect().find_in_set(&list, target))
            }
            OperatorArity::List => {
                let values = match self.required_value()? {
                    FilterValue::Single(value) => std::slice::from_ref(value),
                    FilterValue::List(values) => values.as_slice(),
                };
                if values.is_empty() {
                    // Nothing is IN an empty list, everything is NOT IN it
                    let constant = if self.operator == Operator::In { "1=0" } else { "1=1" };
                    return Ok(constant.to_string());
                }
                let literals: Vec<String> = values.iter().map(|v| writer.literal(v)).collect();
                Ok(format!("{} {} ({})", target, operator, literals.join(",")))
            }
            OperatorArity::Binary => match self.required_value()? {
                FilterValue::Single(value) => {
                    let literal = writer.literal(value);
                    Ok(format!("{} {} {}", target, operator, literal))
                }
                FilterValue::List(_) => Err(ExpressionError::UnexpectedList {
                    operator: operator.to_string(),
                }),
            },
        }
    }

    fn required_value(&self) -> ExprResult<&FilterValue> {
        self.value.as_ref().ok_or_else(|| ExpressionError::MissingValue {
            operator: self.operator.to_sql().to_string(),
        })
    }
}

/// The mutually exclusive shapes a filter can take
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FilterNode {
    #[default]
    Empty,
    Group {
        filters: Vec<Filter>,
        conjunction: Conjunction,
        negate: bool,
    },
    Raw {
        condition: String,
        negate: bool,
    },
    Predicate(Predicate),
}

/// WHERE fragment compiler
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    active: bool,
    node: FilterNode,
}

impl Default for Filter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter {
    /// An active filter that compiles to nothing
    pub fn new() -> Self {
        Self::from_node(FilterNode::Empty)
    }

    pub fn from_node(node: FilterNode) -> Self {
        Self { active: true, node }
    }

    pub fn group(conjunction: Conjunction, filters: Vec<Filter>) -> Self {
        Self::from_node(FilterNode::Group {
            filters,
            conjunction,
            negate: false,
        })
    }

    /// AND group
    pub fn all(filters: Vec<Filter>) -> Self {
        Self::group(Conjunction::And, filters)
    }

    /// OR group
    pub fn any(filters: Vec<Filter>) -> Self {
        Self::group(Conjunction::Or, filters)
    }

    /// Raw trusted condition, embedded verbatim; an empty one compiles to nothing
    pub fn raw(condition: impl Into<String>) -> Self {
        Self::from_node(FilterNode::Raw {
            condition: condition.into(),
            negate: false,
        })
    }

    pub fn predicate(predicate: Predicate) -> Self {
        Self::from_node(FilterNode::Predicate(predicate))
    }

    /// Single-field predicate
    pub fn compare(field: &str, operator: Operator, value: Option<FilterValue>) -> ExprResult<Self> {
        let field = FieldName::new(field)?;
        Ok(Self::predicate(Predicate::new(vec![field], operator, value)))
    }

    /// Predicate over several fields, OR-joined
    pub fn any_field(fields: &[&str], operator: Operator, value: Option<FilterValue>) -> ExprResult<Self> {
        let fields = fields
            .iter()
            .map(|field| FieldName::new(field))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::predicate(Predicate::new(fields, operator, value)))
    }

    /// Equal condition
    pub fn eq(field: &str, value: impl Into<ScalarValue>) -> ExprResult<Self> {
        Self::compare(field, Operator::Eq, Some(FilterValue::single(value)))
    }

    /// Not equal condition
    pub fn ne(field: &str, value: impl Into<ScalarValue>) -> ExprResult<Self> {
        Self::compare(field, Operator::Ne, Some(FilterValue::single(value)))
    }

    /// Greater than condition
    pub fn gt(field: &str, value: impl Into<ScalarValue>) -> ExprResult<Self> {
        Self::compare(field, Operator::Gt, Some(FilterValue::single(value)))
    }

    /// Greater than or equal condition
    pub fn gte(field: &str, value: impl Into<ScalarValue>) -> ExprResult<Self> {
        Self::compare(field, Operator::Gte, Some(FilterValue::single(value)))
    }

    /// Less than condition
    pub fn lt(field: &str, value: impl Into<ScalarValue>) -> ExprResult<Self> {
        Self::compare(field, Operator::Lt, Some(FilterValue::single(value)))
    }

    /// Less than or equal condition
    pub fn lte(field: &str, value: impl Into<ScalarValue>) -> ExprResult<Self> {
        Self::compare(field, Operator::Lte, Some(FilterValue::single(value)))
    }

    /// LIKE condition
    pub fn like(field: &str, pattern: &str) -> ExprResult<Self> {
        Self::compare(field, Operator::Like, Some(FilterValue::single(pattern)))
    }

    /// IN condition
    pub fn in_values<V: Into<ScalarValue>>(field: &str, values: Vec<V>) -> ExprResult<Self> {
        Self::compare(field, Operator::In, Some(FilterValue::list(values)))
    }

    /// NOT IN condition
    pub fn not_in_values<V: Into<ScalarValue>>(field: &str, values: Vec<V>) -> ExprResult<Self> {
        Self::compare(field, Operator::NotIn, Some(FilterValue::list(values)))
    }

    /// IS NULL condition
    pub fn is_null(field: &str) -> ExprResult<Self> {
        Self::compare(field, Operator::IsNull, None)
    }

    /// IS NOT NULL condition
    pub fn is_not_null(field: &str) -> ExprResult<Self> {
        Self::compare(field, Operator::IsNotNull, None)
    }

    /// Membership of any of `values` in a comma separated set column
    pub fn find_in_set<V: Into<ScalarValue>>(field: &str, values: Vec<V>) -> ExprResult<Self> {
        Self::compare(field, Operator::FindInSet, Some(FilterValue::list(values)))
    }

    /// Negate a group or raw condition
    ///
    /// Leaf predicates negate through their operator; asking for both is an error.
    pub fn negated(mut self) -> ExprResult<Self> {
        match &mut self.node {
            FilterNode::Group { negate, .. } | FilterNode::Raw { negate, .. } => *negate = true,
            FilterNode::Predicate(_) => return Err(ExpressionError::AmbiguousNegation),
            FilterNode::Empty => {}
        }
        Ok(self)
    }

    /// Wrap the columns of a leaf predicate in `function`
    ///
    /// Groups, raw conditions and empty filters have no columns; they are
    /// returned unchanged.
    pub fn with_function(mut self, function: Function) -> Self {
        if let FilterNode::Predicate(predicate) = &mut self.node {
            predicate.function = Some(function);
        }
        self
    }

    pub fn set_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn node(&self) -> &FilterNode {
        &self.node
    }

    pub fn has_filters(&self) -> bool {
        matches!(&self.node, FilterNode::Group { filters, .. } if !filters.is_empty())
    }

    pub fn has_fields(&self) -> bool {
        matches!(&self.node, FilterNode::Predicate(predicate) if !predicate.fields.is_empty())
    }

    pub fn is_negating(&self) -> bool {
        match &self.node {
            FilterNode::Group { negate, .. } | FilterNode::Raw { negate, .. } => *negate,
            FilterNode::Predicate(predicate) => predicate.operator.is_negating(),
            FilterNode::Empty => false,
        }
    }

    fn compile_group(
        filters: &[Filter],
        conjunction: Conjunction,
        negate: bool,
        writer: &mut FragmentWriter<'_>,
    ) -> ExprResult<String> {
        let mut conditions = Vec::with_capacity(filters.len());
        for filter in filters {
            let sql = filter.compile(writer)?;
            if !sql.is_empty() {
                conditions.push(sql);
            }
        }

        tracing::trace!(
            "[FILTER] group of {} children, {} non-empty",
            filters.len(),
            conditions.len()
        );

        if conditions.is_empty() {
            return Ok(String::new());
        }

        let joined = compile_conditions(conditions, conjunction.to_sql());
        if negate {
            Ok(format!("{} {}", writer.dialect().negation(), joined))
        } else {
            Ok(joined)
        }
    }
}

impl Expression for Filter {
    fn is_active(&self) -> bool {
        self.active
    }

    fn condition(&self) -> Option<&str> {
        match &self.node {
            FilterNode::Raw { condition, .. } => Some(condition.as_str()),
            _ => None,
        }
    }

    fn compile(&self, writer: &mut FragmentWriter<'_>) -> ExprResult<String> {
        if !self.active {
            return Ok(String::new());
        }

        match &self.node {
            FilterNode::Empty => Ok(String::new()),
            FilterNode::Group {
                filters,
                conjunction,
                negate,
            } => Self::compile_group(filters, *conjunction, *negate, writer),
            FilterNode::Raw { condition, negate } => {
                if condition.is_empty() {
                    return Ok(String::new());
                }
                if *negate {
                    Ok(format!("{} ({})", writer.dialect().negation(), condition))
                } else {
                    Ok(condition.clone())
                }
            }
            FilterNode::Predicate(predicate) => predicate.compile(writer),
        }
    }
}
