//! Fragment rendering
//!
//! A [`RenderContext`] bundles the dialect and the field resolver; a
//! [`FragmentWriter`] carries it through one compilation together with the
//! bind mode and the parameters collected so far.

use crate::dialect::Dialect;
use crate::errors::{ExpressionError, ExprResult};
use crate::resolver::FieldResolver;
use crate::validation::FieldName;
use config::BindMode;
use serde::Serialize;
use type_mapping::ScalarValue;

#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    dialect: &'a dyn Dialect,
    resolver: &'a dyn FieldResolver,
}

impl<'a> RenderContext<'a> {
    pub fn new(dialect: &'a dyn Dialect, resolver: &'a dyn FieldResolver) -> Self {
        Self { dialect, resolver }
    }

    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    pub fn resolver(&self) -> &'a dyn FieldResolver {
        self.resolver
    }
}

/// Compiled SQL text with its bind parameters in placeholder order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fragment {
    pub sql: String,
    pub params: Vec<ScalarValue>,
}

impl Fragment {
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

#[derive(Debug)]
pub struct FragmentWriter<'a> {
    ctx: RenderContext<'a>,
    mode: BindMode,
    params: Vec<ScalarValue>,
}

impl<'a> FragmentWriter<'a> {
    pub fn new(ctx: RenderContext<'a>, mode: BindMode) -> Self {
        Self {
            ctx,
            mode,
            params: Vec::new(),
        }
    }

    pub fn dialect(&self) -> &'a dyn Dialect {
        self.ctx.dialect
    }

    pub fn mode(&self) -> BindMode {
        self.mode
    }

    /// Render a value: a quoted literal inline, a placeholder otherwise
    pub fn literal(&mut self, value: &ScalarValue) -> String {
        match self.mode {
            BindMode::Inline => self.ctx.dialect.quote_literal(value),
            BindMode::Parameterized => {
                self.params.push(value.clone());
                self.ctx.dialect.placeholder(self.params.len())
            }
        }
    }

    /// Resolve every field into its columns, failing when nothing resolves
    pub fn columns(&self, fields: &[FieldName]) -> ExprResult<Vec<String>> {
        let mut columns = Vec::with_capacity(fields.len());
        for field in fields {
            columns.extend(self.ctx.resolver.resolve(field)?);
        }
        if columns.is_empty() {
            return Err(ExpressionError::EmptyProperty);
        }
        Ok(columns)
    }

    pub fn finish(self, sql: String) -> Fragment {
        Fragment {
            sql,
            params: self.params,
        }
    }
}

/// Join compiled conditions; a single condition is returned unwrapped
pub fn compile_conditions(conditions: Vec<String>, joiner: &str) -> String {
    if conditions.len() == 1 {
        return conditions.into_iter().next().unwrap_or_default();
    }
    format!("({})", conditions.join(&format!(" {} ", joiner)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MySqlDialect;
    use crate::resolver::PlainResolver;

    #[test]
    fn test_compile_conditions() {
        assert_eq!(compile_conditions(vec!["a = 1".to_string()], "AND"), "a = 1");
        assert_eq!(
            compile_conditions(vec!["a = 1".to_string(), "b = 2".to_string()], "OR"),
            "(a = 1 OR b = 2)"
        );
    }

    #[test]
    fn test_writer_modes() {
        let ctx = RenderContext::new(&MySqlDialect, &PlainResolver);

        let mut inline = FragmentWriter::new(ctx, BindMode::Inline);
        assert_eq!(inline.literal(&ScalarValue::from("x")), "'x'");
        assert!(inline.finish(String::new()).params.is_empty());

        let mut bound = FragmentWriter::new(ctx, BindMode::Parameterized);
        assert_eq!(bound.literal(&ScalarValue::from("x")), "?");
        assert_eq!(bound.literal(&ScalarValue::from(2)), "?");
        let fragment = bound.finish("a = ? AND b = ?".to_string());
        assert_eq!(
            fragment.params,
            vec![ScalarValue::from("x"), ScalarValue::from(2)]
        );
    }

    #[test]
    fn test_columns_requires_at_least_one() {
        let ctx = RenderContext::new(&MySqlDialect, &PlainResolver);
        let writer = FragmentWriter::new(ctx, BindMode::Inline);
        assert_eq!(writer.columns(&[]), Err(ExpressionError::EmptyProperty));
        let fields = vec![FieldName::new("a").unwrap(), FieldName::new("b").unwrap()];
        assert_eq!(writer.columns(&fields).unwrap(), vec!["a", "b"]);
    }
}
