//! Scalar value definitions
//!
//! This module provides the scalar values that can appear in a compiled
//! fragment, either as quoted literals or as bind parameters.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single scalar value usable in a comparison, an IN list or a FIELD() ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    Text(String),
    Integer(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
}

impl From<String> for ScalarValue {
    fn from(val: String) -> Self {
        ScalarValue::Text(val)
    }
}

impl From<&str> for ScalarValue {
    fn from(val: &str) -> Self {
        ScalarValue::Text(val.to_string())
    }
}

impl From<i32> for ScalarValue {
    fn from(val: i32) -> Self {
        ScalarValue::Integer(i64::from(val))
    }
}

impl From<i64> for ScalarValue {
    fn from(val: i64) -> Self {
        ScalarValue::Integer(val)
    }
}

impl From<u32> for ScalarValue {
    fn from(val: u32) -> Self {
        ScalarValue::Integer(i64::from(val))
    }
}

impl From<u64> for ScalarValue {
    fn from(val: u64) -> Self {
        i64::try_from(val).map_or(ScalarValue::Unsigned(val), ScalarValue::Integer)
    }
}

impl From<f64> for ScalarValue {
    fn from(val: f64) -> Self {
        ScalarValue::Float(val)
    }
}

impl From<bool> for ScalarValue {
    fn from(val: bool) -> Self {
        ScalarValue::Boolean(val)
    }
}

impl From<Uuid> for ScalarValue {
    fn from(val: Uuid) -> Self {
        ScalarValue::Uuid(val)
    }
}

impl From<DateTime<Utc>> for ScalarValue {
    fn from(val: DateTime<Utc>) -> Self {
        ScalarValue::Timestamp(val)
    }
}

impl From<NaiveDate> for ScalarValue {
    fn from(val: NaiveDate) -> Self {
        ScalarValue::Date(val)
    }
}
