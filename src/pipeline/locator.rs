//! Finds the data to parse for a given year.
//!
//! Search order:
//!
//! 1. Local pass 1: the two canonical year-columns extracts, `ingresos.csv`
//!    and `gastos.csv`. When these produce items the pass wins outright.
//! 2. Local pass 2: year-specific then generic traditional filenames, in a
//!    fixed priority order.
//! 3. Network fallback: a fixed ordered list of candidate filenames probed
//!    under the configured endpoint. The first file that parses into at
//!    least one item wins.
//!
//! The locator never fails: every error is logged and treated as "nothing
//! here", and total failure yields an empty list for the aggregator to turn
//! into the baseline summary.

use crate::api::RemoteSource;
use crate::model::{BudgetLineItem, Category};
use crate::pipeline::layout::{self, RawTable};
use std::path::Path;
use tracing::{debug, warn};

/// Canonical year-columns extract filename for income.
const INCOME_FILE: &str = "ingresos.csv";

/// Canonical year-columns extract filename for spending.
const SPENDING_FILE: &str = "gastos.csv";

/// Remote candidate filenames, probed in order.
const REMOTE_CANDIDATES: &[&str] = &[
    "liquidacion.csv",
    "liquidacion_presupuesto.csv",
    "presupuesto.csv",
    "gastos.csv",
    "ingresos.csv",
];

/// Returns the raw line items found for `year`, or an empty list when every
/// source comes up dry.
pub async fn locate(data_dir: &Path, remote: &RemoteSource, year: i32) -> Vec<BudgetLineItem> {
    let items = local_year_columns(data_dir);
    if !items.is_empty() {
        debug!(
            "The canonical year-columns extracts produced {} items",
            items.len()
        );
        return items;
    }

    let items = local_traditional(data_dir, year);
    if !items.is_empty() {
        return items;
    }

    probe_remote(remote, year).await
}

/// Local pass 1: both canonical extracts, each carrying its category.
fn local_year_columns(data_dir: &Path) -> Vec<BudgetLineItem> {
    let mut items = Vec::new();
    for (filename, category) in [
        (INCOME_FILE, Category::Income),
        (SPENDING_FILE, Category::Spending),
    ] {
        if let Some(table) = read_table(&data_dir.join(filename)) {
            items.extend(layout::extract_year_columns(&table, category));
        }
    }
    items
}

/// Local pass 2: traditional filenames in priority order, year-specific
/// names first.
fn local_traditional(data_dir: &Path, year: i32) -> Vec<BudgetLineItem> {
    let candidates = [
        format!("{year}_liquidacion.csv"),
        format!("{year}_presupuesto.csv"),
        String::from("liquidacion.csv"),
        String::from("presupuesto.csv"),
    ];
    for filename in candidates {
        let Some(table) = read_table(&data_dir.join(&filename)) else {
            continue;
        };
        let items = layout::extract(&table, category_hint(&filename), year);
        if !items.is_empty() {
            debug!("Local extract '{filename}' produced {} items", items.len());
            return items;
        }
    }
    Vec::new()
}

/// Network fallback: probe the candidate list, stopping at the first file
/// that parses into at least one item. Not-found is silent; other failures
/// are logged and skipped.
async fn probe_remote(remote: &RemoteSource, year: i32) -> Vec<BudgetLineItem> {
    for filename in REMOTE_CANDIDATES {
        let body = match remote.fetch_csv(year, filename).await {
            Ok(Some(body)) => body,
            Ok(None) => {
                debug!("Remote candidate '{filename}' not found");
                continue;
            }
            Err(e) => {
                warn!("Remote candidate '{filename}' failed: {e:#}");
                continue;
            }
        };
        let table = match RawTable::from_csv(&body) {
            Ok(table) => table,
            Err(e) => {
                warn!("Remote candidate '{filename}' did not parse: {e:#}");
                continue;
            }
        };
        let items = layout::extract(&table, category_hint(filename), year);
        if !items.is_empty() {
            debug!("Remote extract '{filename}' produced {} items", items.len());
            return items;
        }
    }
    Vec::new()
}

/// Reads and parses one local CSV file, or `None` when it is missing or
/// unreadable.
fn read_table(path: &Path) -> Option<RawTable> {
    if !path.is_file() {
        return None;
    }
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Unable to read '{}': {e}", path.display());
            return None;
        }
    };
    match RawTable::from_csv(&text) {
        Ok(table) => Some(table),
        Err(e) => {
            warn!("Unable to parse '{}': {e:#}", path.display());
            None
        }
    }
}

/// Infers the category a filename implies, if any.
fn category_hint(filename: &str) -> Option<Category> {
    if filename.contains("ingreso") {
        Some(Category::Income)
    } else if filename.contains("gasto") {
        Some(Category::Spending)
    } else {
        None
    }
}
