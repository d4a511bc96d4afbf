//! Types that represent the core data model, such as `BudgetLineItem` and
//! `BudgetSummary`.
mod amount;
mod line_item;
mod summary;

pub use amount::{parse_amount, parse_millions, Amount};
pub use line_item::{BudgetLineItem, BudgetType, Category};
pub use summary::{AggregatedEntry, BudgetSummary, CategorySummary, DataSource};
