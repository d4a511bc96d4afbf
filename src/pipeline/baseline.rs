//! The fixed fallback dataset.
//!
//! When nothing can be extracted for a year the caller still receives a
//! complete summary built from this hand-authored dataset. It has one entry
//! per taxonomy type in each category and no external dependency or failure
//! mode. Amounts are euros, loosely modeled on recent Spanish state budgets.

use crate::model::{
    AggregatedEntry, Amount, BudgetSummary, BudgetType, Category, CategorySummary, DataSource,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builds the baseline summary for `year`. The dataset is the same for every
/// year; only the stamped year differs.
pub fn summary(year: i32) -> BudgetSummary {
    BudgetSummary::new(
        year,
        side(Category::Income),
        side(Category::Spending),
        DataSource::Hardcoded,
    )
}

fn side(category: Category) -> CategorySummary {
    CategorySummary::new(
        BudgetType::all(category)
            .iter()
            .map(|&budget_type| AggregatedEntry::new(budget_type, Amount::new(total(budget_type))))
            .collect(),
    )
}

fn total(budget_type: BudgetType) -> Decimal {
    match budget_type {
        BudgetType::PersonalIncomeTax => dec!(112_000_000_000),
        BudgetType::CorporateTax => dec!(28_000_000_000),
        BudgetType::Vat => dec!(86_000_000_000),
        BudgetType::SocialSecurityContributions => dec!(142_000_000_000),
        BudgetType::AutonomousCommunitiesTaxes => dec!(52_000_000_000),
        BudgetType::EuFunds => dec!(24_000_000_000),
        BudgetType::OtherRevenues => dec!(31_000_000_000),
        BudgetType::Pensions => dec!(190_000_000_000),
        BudgetType::SocialSecurity => dec!(25_000_000_000),
        BudgetType::Education => dec!(6_000_000_000),
        BudgetType::Healthcare => dec!(7_000_000_000),
        BudgetType::Defense => dec!(13_000_000_000),
        BudgetType::Infrastructure => dec!(19_000_000_000),
        BudgetType::PublicAdministration => dec!(22_000_000_000),
        BudgetType::DebtInterest => dec!(31_000_000_000),
        BudgetType::OtherSpending => dec!(168_000_000_000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_entry_per_taxonomy_type() {
        let summary = summary(2024);
        assert_eq!(
            summary.income().items().len(),
            BudgetType::all(Category::Income).len()
        );
        assert_eq!(
            summary.spending().items().len(),
            BudgetType::all(Category::Spending).len()
        );
    }

    #[test]
    fn test_tagged_hardcoded_and_stamped_with_year() {
        let summary = summary(1999);
        assert_eq!(summary.data_source(), DataSource::Hardcoded);
        assert_eq!(summary.year(), 1999);
    }

    #[test]
    fn test_totals_are_consistent() {
        let summary = summary(2024);
        let income: Amount = summary
            .income()
            .items()
            .iter()
            .map(AggregatedEntry::total)
            .sum();
        assert_eq!(summary.income().total(), income);
        assert_eq!(
            summary.balance().value(),
            summary.income().total().value() - summary.spending().total().value()
        );
    }

    #[test]
    fn test_shape_is_year_independent() {
        assert_eq!(summary(2020).income(), summary(2030).income());
    }
}
