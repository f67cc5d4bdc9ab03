//! Dialect rendering contract
//!
//! Everything that differs between relational backends is spelled by a
//! [`Dialect`]: literal quoting, bind placeholders and the handful of
//! vendor functions the compiler emits. Operators, SQL functions, directions
//! and conjunctions are spelled by their own enums.

use crate::expression::Function;
use std::fmt;
use type_mapping::{escape_string_literal, ScalarValue};

pub trait Dialect: fmt::Debug + Send + Sync {
    /// Name used to select the dialect from configuration
    fn name(&self) -> &'static str;

    /// Quote a value as a string literal
    fn quote_literal(&self, value: &ScalarValue) -> String;

    /// Placeholder for the bind parameter at 1-based `index`
    fn placeholder(&self, index: usize) -> String;

    /// Token that orders rows randomly
    fn random_order(&self) -> &'static str;

    /// Keyword prefixed to negated groups and conditions
    fn negation(&self) -> &'static str {
        "NOT"
    }

    /// Membership test of `target` in a comma separated `list` literal
    fn find_in_set(&self, list: &str, target: &str) -> String;

    /// Ordering of `target` by its position among `values`
    fn field_order(&self, target: &str, values: &[String]) -> String;

    /// Offset/limit clause
    fn limit(&self, offset: u64, limit: u64) -> String;

    /// Wrap a column in a SQL function call
    fn call_function(&self, function: Function, target: &str) -> String {
        format!("{}({})", function.to_sql(), target)
    }
}

/// MySQL / MariaDB
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_literal(&self, value: &ScalarValue) -> String {
        format!("'{}'", escape_string_literal(&value.to_literal_text()))
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn random_order(&self) -> &'static str {
        "RAND()"
    }

    fn find_in_set(&self, list: &str, target: &str) -> String {
        format!("FIND_IN_SET({}, {})", list, target)
    }

    fn field_order(&self, target: &str, values: &[String]) -> String {
        format!("FIELD({}, {})", target, values.join(","))
    }

    fn limit(&self, offset: u64, limit: u64) -> String {
        format!("LIMIT {}, {}", offset, limit)
    }
}

/// Look up a dialect by its configured name
pub fn dialect_by_name(name: &str) -> Option<Box<dyn Dialect>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "mysql" | "mariadb" => Some(Box::new(MySqlDialect)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_literals() {
        let dialect = MySqlDialect;
        assert_eq!(dialect.quote_literal(&ScalarValue::from("x")), "'x'");
        assert_eq!(dialect.quote_literal(&ScalarValue::from(3)), "'3'");
        assert_eq!(dialect.quote_literal(&ScalarValue::from("it's")), "'it''s'");
        assert_eq!(dialect.placeholder(1), "?");
        assert_eq!(dialect.placeholder(7), "?");
    }

    #[test]
    fn test_mysql_vendor_forms() {
        let dialect = MySqlDialect;
        assert_eq!(dialect.random_order(), "RAND()");
        assert_eq!(dialect.negation(), "NOT");
        assert_eq!(dialect.find_in_set("'a,b'", "tags"), "FIND_IN_SET('a,b', tags)");
        assert_eq!(
            dialect.field_order("x", &["'3'".to_string(), "'1'".to_string()]),
            "FIELD(x, '3','1')"
        );
        assert_eq!(dialect.limit(40, 20), "LIMIT 40, 20");
        assert_eq!(dialect.call_function(Function::Lower, "title"), "LOWER(title)");
    }

    #[test]
    fn test_dialect_by_name() {
        assert_eq!(dialect_by_name("mysql").map(|d| d.name()), Some("mysql"));
        assert_eq!(dialect_by_name(" MariaDB ").map(|d| d.name()), Some("mysql"));
        assert!(dialect_by_name("oracle").is_none());
    }
}
