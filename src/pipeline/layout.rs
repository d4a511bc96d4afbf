//! Table layout detection and row normalization.
//!
//! Source extracts arrive in two incompatible shapes. A "year-columns" table
//! has one row per concept and one column per year:
//!
//! ```text
//! Concepto,2023,2024 (P)
//! Impuestos directos,48000.00,50000.00
//! ```
//!
//! A "traditional" table has one row per line item with explicit amount,
//! concept and category columns, under whatever header names the publishing
//! body chose that year. Rows of either shape are normalized into
//! `BudgetLineItem`s here; anything malformed is skipped, never an error.

use crate::model::{parse_amount, parse_millions, BudgetLineItem, Category};
use crate::pipeline::classify;
use crate::Result;
use anyhow::bail;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Header names accepted for the amount column, in priority order.
const AMOUNT_CANDIDATES: &[&str] = &[
    "importe",
    "cantidad",
    "valor",
    "total",
    "euros",
    "liquidado",
    "ejecutado",
    "presupuestado",
    "amount",
];

/// Header names accepted for the concept column, in priority order.
const CONCEPT_CANDIDATES: &[&str] = &[
    "concepto",
    "descripción",
    "descripcion",
    "nombre",
    "tipo",
    "denominación",
    "denominacion",
    "capítulo",
    "capitulo",
    "description",
    "name",
];

/// Header names accepted for the category column, in priority order.
const CATEGORY_CANDIDATES: &[&str] = &[
    "tipo",
    "categoría",
    "categoria",
    "clase",
    "clasificación",
    "clasificacion",
    "naturaleza",
    "category",
    "class",
];

/// Keywords marking a concept or category cell as income when no category
/// column resolves.
const INCOME_HINTS: &[&str] = &[
    "ingreso", "impuesto", "irpf", "tasa", "renta", "iva", "cotizaci", "revenue", "tax",
];

/// Matches a four-digit year header, optionally marked provisional:
/// `2024`, `2024 (P)`, `2024p`.
static YEAR_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{4})\s*(?:\(\s*[pP]\s*\)|[pP])?\s*$").unwrap());

/// A parsed CSV table before any interpretation: the header row plus data
/// rows, all as strings.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parses CSV text into a table. Rows may be ragged; width mismatches
    /// are handled downstream, not here.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            records.push(record.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        }

        let mut rows = records.into_iter();
        let headers = match rows.next() {
            Some(headers) => headers,
            None => bail!("The CSV document is empty"),
        };
        Ok(Self {
            headers,
            rows: rows.collect(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

/// The two table shapes the pipeline understands.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TableLayout {
    /// One row per concept, one column per year.
    YearColumns,
    /// One row per line item with explicit amount/concept/category columns.
    Traditional,
}

/// Classifies a table's layout. A table is year-columns when every header
/// after the first matches the year pattern; anything else is traditional.
pub fn detect_layout(table: &RawTable) -> TableLayout {
    let year_headers = &table.headers()[1.min(table.headers().len())..];
    if !year_headers.is_empty() && year_headers.iter().all(|h| year_header(h).is_some()) {
        TableLayout::YearColumns
    } else {
        TableLayout::Traditional
    }
}

/// Extracts the year from a header such as `2024` or `2024 (P)`.
fn year_header(header: &str) -> Option<i32> {
    YEAR_HEADER
        .captures(header)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Identifies the amount, concept and category columns of a traditional
/// table by matching header names against the curated candidate lists.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct ColumnMap {
    amount: Option<usize>,
    concept: Option<usize>,
    category: Option<usize>,
}

impl ColumnMap {
    /// Resolves column positions from a header row. Matching is
    /// case-insensitive; candidate order is the priority order.
    pub fn resolve(headers: &[String]) -> Self {
        Self {
            amount: find_column(headers, AMOUNT_CANDIDATES),
            concept: find_column(headers, CONCEPT_CANDIDATES),
            category: find_column(headers, CATEGORY_CANDIDATES),
        }
    }
}

fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|candidate| {
            headers
                .iter()
                .position(|header| header.trim().to_lowercase() == *candidate)
        })
}

/// Extracts line items from a table, dispatching on the detected layout.
///
/// `category_hint` carries the category implied by where the table came from
/// (the canonical income/spending filenames); year-columns tables need it
/// because they have no category column. Traditional rows are stamped with
/// the requested `year`.
pub fn extract(table: &RawTable, category_hint: Option<Category>, year: i32) -> Vec<BudgetLineItem> {
    match detect_layout(table) {
        TableLayout::YearColumns => {
            extract_year_columns(table, category_hint.unwrap_or_default())
        }
        TableLayout::Traditional => extract_traditional(table, year),
    }
}

/// Emits one line item per (surviving row, year column) pair holding a
/// parseable, strictly positive value.
pub fn extract_year_columns(table: &RawTable, category: Category) -> Vec<BudgetLineItem> {
    let concept_header = table.headers().first().map(String::as_str).unwrap_or("");
    let years: Vec<(usize, i32)> = table
        .headers()
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(ix, header)| year_header(header).map(|year| (ix, year)))
        .collect();

    let mut items = Vec::new();
    for row in table.rows() {
        let concept = row.first().map(String::as_str).unwrap_or("").trim();
        if is_noise_row(concept, concept_header) {
            debug!("Skipping noise row '{concept}'");
            continue;
        }
        let budget_type = classify(concept, category);
        for &(ix, year) in &years {
            let Some(cell) = row.get(ix) else { continue };
            let Some(amount) = parse_millions(cell) else {
                continue;
            };
            if let Some(item) = BudgetLineItem::new(year, category, budget_type, amount, concept) {
                items.push(item);
            }
        }
    }
    items
}

/// A row is noise when its concept cell is empty, echoes the header name,
/// mentions a total, or is purely numeric. These are subtotal or spacer rows,
/// not line items.
fn is_noise_row(concept: &str, concept_header: &str) -> bool {
    if concept.is_empty() {
        return true;
    }
    let lower = concept.to_lowercase();
    lower == concept_header.trim().to_lowercase()
        || lower.contains("total")
        || numeric_like(concept)
}

fn numeric_like(s: &str) -> bool {
    let s = s.trim();
    s.chars().any(|c| c.is_ascii_digit())
        && s.chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | ' '))
}

/// Normalizes every row of a traditional table against its resolved columns.
pub fn extract_traditional(table: &RawTable, year: i32) -> Vec<BudgetLineItem> {
    let map = ColumnMap::resolve(table.headers());
    table
        .rows()
        .iter()
        .filter_map(|row| resolve_row(row, &map, year))
        .collect()
}

/// Pure resolution of one raw row into a normalized line item.
///
/// Returns `None` for rows with no usable concept, no numeric amount, or a
/// non-positive amount. When the map has no amount column, the first
/// numeric-looking cell in the row is used instead.
pub fn resolve_row(row: &[String], map: &ColumnMap, year: i32) -> Option<BudgetLineItem> {
    let concept = map
        .concept
        .and_then(|ix| row.get(ix))
        .map(|s| s.trim())
        .unwrap_or("");
    if concept.is_empty() {
        return None;
    }

    let raw_amount = match map.amount {
        Some(ix) => row.get(ix).map(String::as_str),
        None => row.iter().map(String::as_str).find(|cell| numeric_like(cell)),
    }?;
    let amount = parse_amount(raw_amount);

    let category_cell = map.category.and_then(|ix| row.get(ix)).map(String::as_str);
    let category = resolve_category(category_cell, concept);
    let budget_type = classify(concept, category);
    BudgetLineItem::new(year, category, budget_type, amount, concept)
}

/// Decides income vs spending from the category cell when present, else from
/// income-indicating keywords in the concept. Spending is the default.
fn resolve_category(cell: Option<&str>, concept: &str) -> Category {
    let text = match cell.map(str::trim).filter(|s| !s.is_empty()) {
        Some(cell) => cell,
        None => concept,
    };
    if has_income_hint(text) {
        Category::Income
    } else {
        Category::Spending
    }
}

fn has_income_hint(text: &str) -> bool {
    let lower = text.to_lowercase();
    INCOME_HINTS.iter().any(|kw| lower.contains(kw))
}
