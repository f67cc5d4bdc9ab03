//! Validation module
//!
//! Field identifiers end up in SQL text unescaped, so every identifier is
//! checked against a strict grammar before it is accepted.

use std::fmt;
use type_mapping::{is_reserved_keyword, MAX_IDENTIFIER_LENGTH};

/// Validation errors for field identifiers
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Segment contains invalid characters (only alphanumeric and underscore allowed)
    InvalidCharacters(String),
    /// Segment is too long (MySQL limit is 64, PostgreSQL 63; the lower one applies)
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },
    /// Identifier or one of its segments is empty
    Empty,
    /// Segment starts with invalid character (must start with letter or underscore)
    InvalidStartCharacter(String),
    /// Segment is a reserved SQL keyword
    ReservedKeyword(String),
    /// More than `qualifier.name`
    TooManySegments(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidCharacters(name) => {
                write!(f, "Invalid characters in name '{}': only alphanumeric characters and underscores are allowed", name)
            }
            ValidationError::TooLong {
                name,
                length,
                max_length,
            } => {
                write!(
                    f,
                    "Name '{}' is too long: {} characters (max {})",
                    name, length, max_length
                )
            }
            ValidationError::Empty => {
                write!(f, "Name cannot be empty")
            }
            ValidationError::InvalidStartCharacter(name) => {
                write!(f, "Name '{}' must start with a letter or underscore", name)
            }
            ValidationError::ReservedKeyword(name) => {
                write!(f, "Name '{}' is a reserved SQL keyword", name)
            }
            ValidationError::TooManySegments(name) => {
                write!(f, "Name '{}' has more than one qualifier", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A logical field identifier that is safe to place in SQL text
///
/// Either a bare `name` or a qualified `alias.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldName(String);

impl FieldName {
    /// Create a new validated field identifier
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let segments: Vec<&str> = name.split('.').collect();
        if segments.len() > 2 {
            return Err(ValidationError::TooManySegments(name.to_string()));
        }
        for segment in segments {
            Self::validate_segment(segment)?;
        }
        Ok(Self(name.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the identifier as a String
    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether the identifier already carries a table qualifier
    pub fn is_qualified(&self) -> bool {
        self.0.contains('.')
    }

    fn validate_segment(name: &str) -> Result<(), ValidationError> {
        let first_char = name.chars().next().ok_or(ValidationError::Empty)?;

        if name.len() > MAX_IDENTIFIER_LENGTH {
            return Err(ValidationError::TooLong {
                name: name.to_string(),
                length: name.len(),
                max_length: MAX_IDENTIFIER_LENGTH,
            });
        }

        if !first_char.is_ascii_alphabetic() && first_char != '_' {
            return Err(ValidationError::InvalidStartCharacter(name.to_string()));
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::InvalidCharacters(name.to_string()));
        }

        if is_reserved_keyword(name) {
            return Err(ValidationError::ReservedKeyword(name.to_string()));
        }

        Ok(())
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for FieldName {
    type Error = ValidationError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_field_names() {
        let valid_names = [
            "title",
            "created_at",
            "CamelCase",
            "_private",
            "field123",
            "p.title",
            "page_2.sorting",
            &"a".repeat(63),
        ];

        for name in valid_names {
            assert!(
                FieldName::new(name).is_ok(),
                "Should accept valid name: {}",
                name
            );
        }
    }

    #[test]
    fn test_invalid_field_names() {
        let test_cases = [
            ("", ValidationError::Empty),
            ("p.", ValidationError::Empty),
            (".title", ValidationError::Empty),
            (
                "1title",
                ValidationError::InvalidStartCharacter("1title".to_string()),
            ),
            (
                "title-en",
                ValidationError::InvalidCharacters("title-en".to_string()),
            ),
            (
                "title = 1 OR 1",
                ValidationError::InvalidCharacters("title = 1 OR 1".to_string()),
            ),
            ("select", ValidationError::ReservedKeyword("select".to_string())),
            ("p.WHERE", ValidationError::ReservedKeyword("WHERE".to_string())),
            (
                "db.p.title",
                ValidationError::TooManySegments("db.p.title".to_string()),
            ),
        ];

        for (name, expected_error) in test_cases {
            let result = FieldName::new(name);
            assert_eq!(result.unwrap_err(), expected_error, "input: {:?}", name);
        }
    }

    #[test]
    fn test_too_long_segment() {
        let long_name = "a".repeat(64);
        match FieldName::new(&long_name).unwrap_err() {
            ValidationError::TooLong {
                length, max_length, ..
            } => {
                assert_eq!(length, 64);
                assert_eq!(max_length, 63);
            }
            other => panic!("Expected TooLong error, got {:?}", other),
        }
    }

    #[test]
    fn test_qualification_helpers() {
        let bare = FieldName::new("title").unwrap();
        assert!(!bare.is_qualified());

        let qualified = FieldName::new("p.title").unwrap();
        assert!(qualified.is_qualified());
        assert_eq!(qualified.to_string(), "p.title");
    }
}
