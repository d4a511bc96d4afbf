//! The aggregated yearly summary returned to callers.

use crate::model::{Amount, BudgetType};
use serde::{Deserialize, Serialize};

/// Whether a summary was built from extracted data or from the baseline
/// dataset.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Real,
    #[default]
    Hardcoded,
}

serde_plain::derive_display_from_serialize!(DataSource);
serde_plain::derive_fromstr_from_deserialize!(DataSource);

/// The summed total for one budget type within a year and category.
///
/// Serialized with the type under `_id`, matching the summary document shape
/// consumed downstream.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AggregatedEntry {
    #[serde(rename = "_id")]
    budget_type: BudgetType,
    total: Amount,
}

impl AggregatedEntry {
    pub fn new(budget_type: BudgetType, total: Amount) -> Self {
        Self { budget_type, total }
    }

    pub fn budget_type(&self) -> BudgetType {
        self.budget_type
    }

    pub fn total(&self) -> Amount {
        self.total
    }
}

/// One side of the summary: the per-type entries and their sum.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    items: Vec<AggregatedEntry>,
    total: Amount,
}

impl CategorySummary {
    /// Builds a category summary, computing `total` as the sum of the
    /// entries.
    pub fn new(items: Vec<AggregatedEntry>) -> Self {
        let total = items.iter().map(AggregatedEntry::total).sum();
        Self { items, total }
    }

    pub fn items(&self) -> &[AggregatedEntry] {
        &self.items
    }

    pub fn total(&self) -> Amount {
        self.total
    }
}

/// The yearly income/spending/balance summary.
///
/// This is the one artifact the pipeline always produces: either built from
/// extracted line items (`data_source = real`) or from the baseline dataset
/// (`data_source = hardcoded`).
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    year: i32,
    income: CategorySummary,
    spending: CategorySummary,
    balance: Amount,
    #[serde(rename = "dataSource")]
    data_source: DataSource,
}

impl BudgetSummary {
    /// Builds a summary, computing `balance` as income minus spending.
    pub fn new(
        year: i32,
        income: CategorySummary,
        spending: CategorySummary,
        data_source: DataSource,
    ) -> Self {
        let balance = Amount::new(income.total().value() - spending.total().value());
        Self {
            year,
            income,
            spending,
            balance,
            data_source,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn income(&self) -> &CategorySummary {
        &self.income
    }

    pub fn spending(&self) -> &CategorySummary {
        &self.spending
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn data_source(&self) -> DataSource {
        self.data_source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(budget_type: BudgetType, value: rust_decimal::Decimal) -> AggregatedEntry {
        AggregatedEntry::new(budget_type, Amount::new(value))
    }

    #[test]
    fn test_category_summary_totals() {
        let summary = CategorySummary::new(vec![
            entry(BudgetType::Vat, dec!(100)),
            entry(BudgetType::CorporateTax, dec!(50)),
        ]);
        assert_eq!(summary.total().value(), dec!(150));
    }

    #[test]
    fn test_balance_is_income_minus_spending() {
        let income = CategorySummary::new(vec![entry(BudgetType::Vat, dec!(300))]);
        let spending = CategorySummary::new(vec![entry(BudgetType::Pensions, dec!(120))]);
        let summary = BudgetSummary::new(2024, income, spending, DataSource::Real);
        assert_eq!(summary.balance().value(), dec!(180));
    }

    #[test]
    fn test_serialized_shape() {
        let income = CategorySummary::new(vec![entry(BudgetType::Vat, dec!(10))]);
        let spending = CategorySummary::new(vec![]);
        let summary = BudgetSummary::new(2024, income, spending, DataSource::Hardcoded);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["year"], 2024);
        assert_eq!(json["income"]["items"][0]["_id"], "vat");
        assert_eq!(json["dataSource"], "hardcoded");
        assert_eq!(json["balance"], serde_json::json!(10.0));
    }

    #[test]
    fn test_data_source_round_trip() {
        assert_eq!(DataSource::Real.to_string(), "real");
        assert_eq!(DataSource::Hardcoded.to_string(), "hardcoded");
    }
}
