//! The manual-entry store.
//!
//! Users can record budget line items by hand, and the summary pipeline
//! merges them with whatever it extracts. Persistence is a capability passed
//! into the handlers: `SqliteStore` when enabled, `NoopStore` when the
//! configuration turns it off. The pipeline itself works with either.

mod migrations;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::model::{BudgetLineItem, Category};
use crate::Result;
use async_trait::async_trait;

/// Filters for querying stored entries. Unset fields match everything.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct EntryFilter {
    year: Option<i32>,
    category: Option<Category>,
}

impl EntryFilter {
    pub fn new(year: Option<i32>, category: Option<Category>) -> Self {
        Self { year, category }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }
}

/// A persistence capability for manually entered line items.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Persists one line item.
    async fn create(&self, item: &BudgetLineItem) -> Result<()>;

    /// Returns the stored items matching `filter`.
    async fn query(&self, filter: EntryFilter) -> Result<Vec<BudgetLineItem>>;

    /// Returns the distinct years with at least one stored item, ascending.
    async fn distinct_years(&self) -> Result<Vec<i32>>;
}

/// The store used when persistence is disabled: stores nothing and returns
/// nothing, so the rest of the program needs no special case.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

#[async_trait]
impl EntryStore for NoopStore {
    async fn create(&self, _item: &BudgetLineItem) -> Result<()> {
        Ok(())
    }

    async fn query(&self, _filter: EntryFilter) -> Result<Vec<BudgetLineItem>> {
        Ok(Vec::new())
    }

    async fn distinct_years(&self) -> Result<Vec<i32>> {
        Ok(Vec::new())
    }
}
