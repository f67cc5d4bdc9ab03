//! Literal text rendering
//!
//! This module turns scalar values into the unquoted text a dialect wraps
//! in its literal quotes, and provides the string escaping used for it.

use crate::types::ScalarValue;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

impl ScalarValue {
    /// Unquoted textual form of the value
    pub fn to_literal_text(&self) -> String {
        match self {
            ScalarValue::Text(text) => text.clone(),
            ScalarValue::Integer(n) => n.to_string(),
            ScalarValue::Unsigned(n) => n.to_string(),
            ScalarValue::Float(f) => f.to_string(),
            ScalarValue::Boolean(b) => String::from(if *b { "1" } else { "0" }),
            ScalarValue::Uuid(id) => id.hyphenated().to_string(),
            ScalarValue::Timestamp(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
            ScalarValue::Date(date) => date.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Longest identifier segment (column, table or alias name) accepted in SQL text
pub const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Statement and operator keywords that would change the meaning of a fragment
pub fn is_reserved_keyword(name: &str) -> bool {
    const RESERVED_KEYWORDS: &[&str] = &[
        "SELECT", "INSERT", "UPDATE", "DELETE", "REPLACE", "DROP", "ALTER", "CREATE",
        "TRUNCATE", "GRANT", "REVOKE", "UNION", "FROM", "WHERE", "JOIN", "ON", "AS",
        "AND", "OR", "XOR", "NOT", "NULL", "TRUE", "FALSE", "IS", "IN", "LIKE",
        "REGEXP", "BETWEEN", "EXISTS", "CASE", "WHEN", "THEN", "ELSE", "END", "ORDER",
        "BY", "GROUP", "HAVING", "LIMIT", "OFFSET", "INTO", "VALUES", "SET", "DISTINCT",
    ];

    RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
}

/// Escape text for use inside a single-quoted string literal
///
/// Backslashes are doubled, single quotes are doubled and NUL becomes `\0`.
pub fn escape_string_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("''"),
            '\0' => escaped.push_str("\\0"),
            c => escaped.push(c),
        }
    }
    escaped
}
