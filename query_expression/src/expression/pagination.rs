//! Pagination expressions

use super::base::Expression;
use crate::errors::ExprResult;
use crate::render::FragmentWriter;

/// Largest offset that still fits a signed 64-bit column
const MAX_OFFSET: u64 = i64::MAX as u64;

/// LIMIT fragment compiler for 1-based pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    active: bool,
    page: u64,
    num_per_page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl Pagination {
    /// `num_per_page == 0` means unbounded
    pub fn new(page: u64, num_per_page: u64) -> Self {
        Self {
            active: true,
            page,
            num_per_page,
        }
    }

    pub fn set_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn num_per_page(&self) -> u64 {
        self.num_per_page
    }

    pub fn limit(&self) -> u64 {
        self.num_per_page
    }

    /// Rows to skip; pages 0 and 1 both start at the first row
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.num_per_page)
            .min(MAX_OFFSET)
    }

    /// Number of pages needed for `total_items`
    pub fn total_pages(&self, total_items: u64) -> u64 {
        if total_items == 0 {
            0
        } else if self.num_per_page == 0 {
            1
        } else {
            total_items.div_ceil(self.num_per_page)
        }
    }
}

impl Expression for Pagination {
    fn is_active(&self) -> bool {
        self.active
    }

    fn compile(&self, writer: &mut FragmentWriter<'_>) -> ExprResult<String> {
        if !self.active || self.limit() == 0 {
            return Ok(String::new());
        }

        tracing::trace!(
            "[PAGINATION] page {} of size {}",
            self.page,
            self.num_per_page
        );

        Ok(writer.dialect().limit(self.offset(), self.limit()))
    }
}
