//! The ingestion → normalization → classification → aggregation pipeline.
//!
//! One summary request runs this sequence: locate source tables, detect
//! their layout, normalize rows into line items, classify concepts, then
//! aggregate into a `BudgetSummary`. Nothing here mutates shared state and
//! the only suspension point is the bounded network probe, so concurrent
//! requests are independent.

mod aggregate;
pub mod baseline;
mod classify;
pub mod layout;
mod locator;

pub use aggregate::aggregate;
pub use classify::classify;
pub use locator::locate;

use crate::api::RemoteSource;
use crate::model::BudgetSummary;
use crate::store::{EntryFilter, EntryStore};
use crate::Config;
use tracing::{debug, warn};

/// Runs the full pipeline for `year` and always produces a summary.
///
/// Located items are merged with any manually stored entries for the year
/// before aggregation. Store failures are logged and ignored; the summary
/// contract never fails for a structurally valid year.
pub async fn summarize(
    config: &Config,
    remote: &RemoteSource,
    store: &dyn EntryStore,
    year: i32,
) -> BudgetSummary {
    let mut items = locate(config.data_dir(), remote, year).await;

    match store.query(EntryFilter::new(Some(year), None)).await {
        Ok(stored) => {
            if !stored.is_empty() {
                debug!("Merging {} stored entries for {year}", stored.len());
            }
            items.extend(stored);
        }
        Err(e) => warn!("The entry store could not be queried: {e:#}"),
    }

    aggregate(&items, year)
}
