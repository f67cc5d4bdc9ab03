//! JSON conversion
//!
//! Declarative input arrives as JSON; only strings, numbers and booleans
//! map onto scalar values.

use crate::types::ScalarValue;
use serde_json::{Number, Value};

impl ScalarValue {
    /// Convert a JSON value into a scalar, `None` for null, arrays and objects
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(ScalarValue::Text(s.clone())),
            Value::Bool(b) => Some(ScalarValue::Boolean(*b)),
            Value::Number(n) => Some(number_to_scalar(n)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

fn number_to_scalar(n: &Number) -> ScalarValue {
    if let Some(i) = n.as_i64() {
        ScalarValue::Integer(i)
    } else if let Some(u) = n.as_u64() {
        // above i64::MAX; a float would lose digits
        ScalarValue::Unsigned(u)
    } else {
        ScalarValue::Float(n.as_f64().unwrap_or(f64::MAX))
    }
}

/// Keep the scalar entries of a JSON list in order, dropping everything else
pub fn scalars_from_json(values: &[Value]) -> Vec<ScalarValue> {
    values.iter().filter_map(ScalarValue::from_json).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(
            ScalarValue::from_json(&json!("x")),
            Some(ScalarValue::Text("x".to_string()))
        );
        assert_eq!(ScalarValue::from_json(&json!(3)), Some(ScalarValue::Integer(3)));
        assert_eq!(ScalarValue::from_json(&json!(2.5)), Some(ScalarValue::Float(2.5)));
        assert_eq!(ScalarValue::from_json(&json!(true)), Some(ScalarValue::Boolean(true)));
    }

    #[test]
    fn test_from_json_non_scalars() {
        assert_eq!(ScalarValue::from_json(&json!(null)), None);
        assert_eq!(ScalarValue::from_json(&json!([1, 2])), None);
        assert_eq!(ScalarValue::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn test_scalars_from_json_drops_non_scalars() {
        let values = vec![json!(3), json!([1]), json!("b"), json!(null), json!({"k": 1}), json!(1)];
        let scalars = scalars_from_json(&values);
        assert_eq!(
            scalars,
            vec![
                ScalarValue::Integer(3),
                ScalarValue::Text("b".to_string()),
                ScalarValue::Integer(1),
            ]
        );
    }

    #[test]
    fn test_large_unsigned_integers_keep_every_digit() {
        let value = ScalarValue::from_json(&json!(18446744073709551615u64)).unwrap();
        assert_eq!(value, ScalarValue::Unsigned(u64::MAX));
        assert_eq!(value.to_literal_text(), "18446744073709551615");

        let value = ScalarValue::from_json(&json!(9223372036854775808u64)).unwrap();
        assert_eq!(value.to_literal_text(), "9223372036854775808");

        assert_eq!(
            ScalarValue::from_json(&json!(i64::MAX)),
            Some(ScalarValue::Integer(i64::MAX))
        );
        assert_eq!(
            ScalarValue::from_json(&json!(-5)),
            Some(ScalarValue::Integer(-5))
        );
    }
}
