//! Field identifier resolution
//!
//! The compiler never knows the physical schema. A [`FieldResolver`] turns a
//! logical identifier into one or more column references; multilingual
//! properties typically expand to one column per language.

use crate::errors::ExprResult;
use crate::validation::{FieldName, ValidationError};
use std::collections::HashMap;
use std::fmt;

pub trait FieldResolver: fmt::Debug + Send + Sync {
    /// Column references for `field`, in the order they should be emitted
    fn resolve(&self, field: &FieldName) -> ExprResult<Vec<String>>;
}

/// Emits identifiers exactly as given
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainResolver;

impl FieldResolver for PlainResolver {
    fn resolve(&self, field: &FieldName) -> ExprResult<Vec<String>> {
        Ok(vec![field.as_str().to_string()])
    }
}

/// Qualifies bare identifiers with a table alias
#[derive(Debug, Clone)]
pub struct TableAliasResolver {
    alias: String,
}

impl TableAliasResolver {
    pub fn new(alias: &str) -> Result<Self, ValidationError> {
        let alias = FieldName::new(alias)?;
        if alias.is_qualified() {
            return Err(ValidationError::TooManySegments(alias.into_string()));
        }
        Ok(Self {
            alias: alias.into_string(),
        })
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }
}

impl FieldResolver for TableAliasResolver {
    fn resolve(&self, field: &FieldName) -> ExprResult<Vec<String>> {
        if field.is_qualified() {
            Ok(vec![field.as_str().to_string()])
        } else {
            Ok(vec![format!("{}.{}", self.alias, field)])
        }
    }
}

/// Explicit identifier to column expansion with a fallback resolver
#[derive(Debug, Clone)]
pub struct PropertyMap<R = PlainResolver> {
    columns: HashMap<FieldName, Vec<String>>,
    fallback: R,
}

impl<R: FieldResolver> PropertyMap<R> {
    pub fn new(fallback: R) -> Self {
        Self {
            columns: HashMap::new(),
            fallback,
        }
    }

    /// Map `field` onto `columns`; every column must itself be a valid identifier
    pub fn map(mut self, field: &str, columns: &[&str]) -> Result<Self, ValidationError> {
        let field = FieldName::new(field)?;
        let columns = columns
            .iter()
            .map(|column| FieldName::new(column).map(FieldName::into_string))
            .collect::<Result<Vec<_>, _>>()?;
        self.columns.insert(field, columns);
        Ok(self)
    }
}

impl<R: FieldResolver> FieldResolver for PropertyMap<R> {
    fn resolve(&self, field: &FieldName) -> ExprResult<Vec<String>> {
        match self.columns.get(field) {
            Some(columns) => Ok(columns.clone()),
            None => self.fallback.resolve(field),
        }
    }
}
