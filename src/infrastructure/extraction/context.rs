//! Per-run extraction context.

use crate::domain::query::FareQuery;

/// Read-only context threaded through one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractContext<'q> {
    /// The query this page was rendered for; supplies route codes the page
    /// itself may not repeat.
    pub query: &'q FareQuery,
}

impl<'q> ExtractContext<'q> {
    pub fn new(query: &'q FareQuery) -> Self {
        Self { query }
    }
}
