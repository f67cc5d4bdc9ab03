//! Fixed vocabularies
//!
//! Operators, functions, conjunctions and order keywords are closed sets.
//! Parsing rejects anything outside them, which is what keeps caller supplied
//! tokens out of the generated SQL.

use crate::errors::{ExpressionError, ExprResult};
use std::fmt;
use std::str::FromStr;

/// Normalize a caller token: trimmed, uppercase, single spaces
fn normalize(token: &str) -> String {
    token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

/// Comparison operators accepted in predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    #[default]
    Eq,
    Ne,
    NeAnsi,
    NullSafeEq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
    Regexp,
    NotRegexp,
    In,
    NotIn,
    IsNull,
    IsNotNull,
    IsTrue,
    IsNotTrue,
    IsFalse,
    IsNotFalse,
    IsUnknown,
    IsNotUnknown,
    FindInSet,
    /// Postfix negation of the target; in groups and raw conditions this token means "negate"
    Not,
}

/// How an operator consumes its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorArity {
    /// `target <op> 'value'`
    Binary,
    /// `target <op> ('v1','v2')`
    List,
    /// `target <op>`
    Unary,
    /// `FIND_IN_SET('v1,v2', target)`
    SetMembership,
}

impl Operator {
    /// Convert operator to SQL string
    pub fn to_sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::NeAnsi => "<>",
            Operator::NullSafeEq => "<=>",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::Regexp => "REGEXP",
            Operator::NotRegexp => "NOT REGEXP",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
            Operator::IsTrue => "IS TRUE",
            Operator::IsNotTrue => "IS NOT TRUE",
            Operator::IsFalse => "IS FALSE",
            Operator::IsNotFalse => "IS NOT FALSE",
            Operator::IsUnknown => "IS UNKNOWN",
            Operator::IsNotUnknown => "IS NOT UNKNOWN",
            Operator::FindInSet => "FIND_IN_SET",
            Operator::Not => "NOT",
        }
    }

    pub fn arity(&self) -> OperatorArity {
        match self {
            Operator::Eq
            | Operator::Ne
            | Operator::NeAnsi
            | Operator::NullSafeEq
            | Operator::Gt
            | Operator::Gte
            | Operator::Lt
            | Operator::Lte
            | Operator::Like
            | Operator::NotLike
            | Operator::Regexp
            | Operator::NotRegexp => OperatorArity::Binary,
            Operator::In | Operator::NotIn => OperatorArity::List,
            Operator::IsNull
            | Operator::IsNotNull
            | Operator::IsTrue
            | Operator::IsNotTrue
            | Operator::IsFalse
            | Operator::IsNotFalse
            | Operator::IsUnknown
            | Operator::IsNotUnknown
            | Operator::Not => OperatorArity::Unary,
            Operator::FindInSet => OperatorArity::SetMembership,
        }
    }

    /// Whether the token doubles as a negation flag for groups and raw conditions
    pub fn is_negating(&self) -> bool {
        matches!(self, Operator::Not)
    }
}

impl FromStr for Operator {
    type Err = ExpressionError;

    fn from_str(token: &str) -> ExprResult<Self> {
        let op = match normalize(token).as_str() {
            "=" => Operator::Eq,
            "!=" => Operator::Ne,
            "<>" => Operator::NeAnsi,
            "<=>" => Operator::NullSafeEq,
            ">" => Operator::Gt,
            ">=" => Operator::Gte,
            "<" => Operator::Lt,
            "<=" => Operator::Lte,
            "LIKE" => Operator::Like,
            "NOT LIKE" => Operator::NotLike,
            "REGEXP" => Operator::Regexp,
            "NOT REGEXP" => Operator::NotRegexp,
            "IN" => Operator::In,
            "NOT IN" => Operator::NotIn,
            "IS NULL" => Operator::IsNull,
            "IS NOT NULL" => Operator::IsNotNull,
            "IS TRUE" => Operator::IsTrue,
            "IS NOT TRUE" => Operator::IsNotTrue,
            "IS FALSE" => Operator::IsFalse,
            "IS NOT FALSE" => Operator::IsNotFalse,
            "IS UNKNOWN" => Operator::IsUnknown,
            "IS NOT UNKNOWN" => Operator::IsNotUnknown,
            "FIND_IN_SET" => Operator::FindInSet,
            "!" | "NOT" => Operator::Not,
            _ => return Err(ExpressionError::InvalidOperator(token.to_string())),
        };
        Ok(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

/// SQL functions a predicate may wrap its column in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    // math
    Abs,
    Ceil,
    Floor,
    Round,
    Sign,
    Sqrt,
    // string
    Lower,
    Upper,
    Length,
    CharLength,
    Trim,
    Ltrim,
    Rtrim,
    Reverse,
    // date
    Date,
    Year,
    Month,
    Day,
    DayOfWeek,
    DayOfYear,
    Week,
    Hour,
    Minute,
    Second,
    UnixTimestamp,
}

impl Function {
    /// Convert function to SQL string
    pub fn to_sql(&self) -> &'static str {
        match self {
            Function::Abs => "ABS",
            Function::Ceil => "CEIL",
            Function::Floor => "FLOOR",
            Function::Round => "ROUND",
            Function::Sign => "SIGN",
            Function::Sqrt => "SQRT",
            Function::Lower => "LOWER",
            Function::Upper => "UPPER",
            Function::Length => "LENGTH",
            Function::CharLength => "CHAR_LENGTH",
            Function::Trim => "TRIM",
            Function::Ltrim => "LTRIM",
            Function::Rtrim => "RTRIM",
            Function::Reverse => "REVERSE",
            Function::Date => "DATE",
            Function::Year => "YEAR",
            Function::Month => "MONTH",
            Function::Day => "DAY",
            Function::DayOfWeek => "DAYOFWEEK",
            Function::DayOfYear => "DAYOFYEAR",
            Function::Week => "WEEK",
            Function::Hour => "HOUR",
            Function::Minute => "MINUTE",
            Function::Second => "SECOND",
            Function::UnixTimestamp => "UNIX_TIMESTAMP",
        }
    }
}

impl FromStr for Function {
    type Err = ExpressionError;

    fn from_str(token: &str) -> ExprResult<Self> {
        let function = match normalize(token).as_str() {
            "ABS" => Function::Abs,
            "CEIL" | "CEILING" => Function::Ceil,
            "FLOOR" => Function::Floor,
            "ROUND" => Function::Round,
            "SIGN" => Function::Sign,
            "SQRT" => Function::Sqrt,
            "LOWER" | "LCASE" => Function::Lower,
            "UPPER" | "UCASE" => Function::Upper,
            "LENGTH" => Function::Length,
            "CHAR_LENGTH" => Function::CharLength,
            "TRIM" => Function::Trim,
            "LTRIM" => Function::Ltrim,
            "RTRIM" => Function::Rtrim,
            "REVERSE" => Function::Reverse,
            "DATE" => Function::Date,
            "YEAR" => Function::Year,
            "MONTH" => Function::Month,
            "DAY" | "DAYOFMONTH" => Function::Day,
            "DAYOFWEEK" => Function::DayOfWeek,
            "DAYOFYEAR" => Function::DayOfYear,
            "WEEK" => Function::Week,
            "HOUR" => Function::Hour,
            "MINUTE" => Function::Minute,
            "SECOND" => Function::Second,
            "UNIX_TIMESTAMP" => Function::UnixTimestamp,
            _ => return Err(ExpressionError::InvalidFunction(token.to_string())),
        };
        Ok(function)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

/// Joiner between sibling filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

impl Conjunction {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
        }
    }
}

impl FromStr for Conjunction {
    type Err = ExpressionError;

    fn from_str(token: &str) -> ExprResult<Self> {
        match normalize(token).as_str() {
            "AND" => Ok(Conjunction::And),
            "OR" => Ok(Conjunction::Or),
            _ => Err(ExpressionError::InvalidOperand(token.to_string())),
        }
    }
}

/// Sort direction suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = ExpressionError;

    fn from_str(token: &str) -> ExprResult<Self> {
        match normalize(token).as_str() {
            "ASC" => Ok(Direction::Asc),
            "DESC" => Ok(Direction::Desc),
            _ => Err(ExpressionError::InvalidDirection(token.to_string())),
        }
    }
}

/// Explicit sort strategy of an [`Order`](crate::expression::Order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderMode {
    Asc,
    Desc,
    Random,
    Values,
    Custom,
}

impl OrderMode {
    /// Direction implied by the mode, if any
    pub fn direction(&self) -> Option<Direction> {
        match self {
            OrderMode::Asc => Some(Direction::Asc),
            OrderMode::Desc => Some(Direction::Desc),
            OrderMode::Random | OrderMode::Values | OrderMode::Custom => None,
        }
    }
}

impl FromStr for OrderMode {
    type Err = ExpressionError;

    fn from_str(token: &str) -> ExprResult<Self> {
        let mode = match normalize(token).as_str() {
            "ASC" => OrderMode::Asc,
            "DESC" => OrderMode::Desc,
            "RANDOM" | "RAND" => OrderMode::Random,
            "VALUES" => OrderMode::Values,
            "CUSTOM" => OrderMode::Custom,
            _ => return Err(ExpressionError::InvalidOrderMode(token.to_string())),
        };
        Ok(mode)
    }
}
