//! Shared expression contract
//!
//! Every expression kind is switched on and off with `active` and may carry a
//! raw, trusted condition. The condition is embedded verbatim; it is never
//! escaped or validated, so it must not come from untrusted input.

use crate::errors::ExprResult;
use crate::render::{Fragment, FragmentWriter, RenderContext};
use config::BindMode;

pub trait Expression {
    fn is_active(&self) -> bool;

    /// Raw SQL condition carried by the expression, if any
    fn condition(&self) -> Option<&str> {
        None
    }

    fn has_condition(&self) -> bool {
        self.condition().is_some_and(|condition| !condition.is_empty())
    }

    /// Compile into `writer`; inactive expressions compile to an empty string
    fn compile(&self, writer: &mut FragmentWriter<'_>) -> ExprResult<String>;

    /// SQL text with values quoted inline
    fn sql(&self, ctx: &RenderContext<'_>) -> ExprResult<String> {
        let mut writer = FragmentWriter::new(*ctx, BindMode::Inline);
        self.compile(&mut writer)
    }

    /// SQL text with placeholders, plus the values to bind
    fn to_fragment(&self, ctx: &RenderContext<'_>) -> ExprResult<Fragment> {
        self.render(ctx, BindMode::Parameterized)
    }

    fn render(&self, ctx: &RenderContext<'_>, mode: BindMode) -> ExprResult<Fragment> {
        let mut writer = FragmentWriter::new(*ctx, mode);
        let sql = self.compile(&mut writer)?;
        Ok(writer.finish(sql))
    }
}

/// The bare escape hatch: an optional raw condition and nothing else
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomExpression {
    pub active: bool,
    pub condition: Option<String>,
}

impl CustomExpression {
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            active: true,
            condition: Some(condition.into()),
        }
    }

    pub fn set_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl Default for CustomExpression {
    fn default() -> Self {
        Self {
            active: true,
            condition: None,
        }
    }
}

impl Expression for CustomExpression {
    fn is_active(&self) -> bool {
        self.active
    }

    fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    fn compile(&self, _writer: &mut FragmentWriter<'_>) -> ExprResult<String> {
        if self.is_active() && self.has_condition() {
            Ok(self.condition.clone().unwrap_or_default())
        } else {
            Ok(String::new())
        }
    }
}
