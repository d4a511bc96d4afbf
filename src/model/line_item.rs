//! The normalized budget line item and its closed type taxonomy.

use crate::model::Amount;
use serde::{Deserialize, Serialize};

/// Top-level split between money coming in and money going out.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Income,
    #[default]
    Spending,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

/// The fixed, closed set of budget line-item types.
///
/// Every line item carries exactly one of these. Free-text concepts that no
/// classifier rule recognizes land in the per-category catch-all
/// (`OtherRevenues` / `OtherSpending`).
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BudgetType {
    // Income types
    PersonalIncomeTax,
    CorporateTax,
    Vat,
    SocialSecurityContributions,
    AutonomousCommunitiesTaxes,
    EuFunds,
    OtherRevenues,
    // Spending types
    Pensions,
    SocialSecurity,
    Education,
    Healthcare,
    Defense,
    Infrastructure,
    PublicAdministration,
    DebtInterest,
    #[default]
    OtherSpending,
}

serde_plain::derive_display_from_serialize!(BudgetType);
serde_plain::derive_fromstr_from_deserialize!(BudgetType);

impl BudgetType {
    /// The catch-all type for concepts that match no classification rule.
    pub fn catch_all(category: Category) -> Self {
        match category {
            Category::Income => BudgetType::OtherRevenues,
            Category::Spending => BudgetType::OtherSpending,
        }
    }

    /// The category this type belongs to.
    pub fn category(&self) -> Category {
        match self {
            BudgetType::PersonalIncomeTax
            | BudgetType::CorporateTax
            | BudgetType::Vat
            | BudgetType::SocialSecurityContributions
            | BudgetType::AutonomousCommunitiesTaxes
            | BudgetType::EuFunds
            | BudgetType::OtherRevenues => Category::Income,
            BudgetType::Pensions
            | BudgetType::SocialSecurity
            | BudgetType::Education
            | BudgetType::Healthcare
            | BudgetType::Defense
            | BudgetType::Infrastructure
            | BudgetType::PublicAdministration
            | BudgetType::DebtInterest
            | BudgetType::OtherSpending => Category::Spending,
        }
    }

    /// All types belonging to `category`, in taxonomy order.
    pub fn all(category: Category) -> &'static [BudgetType] {
        match category {
            Category::Income => &[
                BudgetType::PersonalIncomeTax,
                BudgetType::CorporateTax,
                BudgetType::Vat,
                BudgetType::SocialSecurityContributions,
                BudgetType::AutonomousCommunitiesTaxes,
                BudgetType::EuFunds,
                BudgetType::OtherRevenues,
            ],
            Category::Spending => &[
                BudgetType::Pensions,
                BudgetType::SocialSecurity,
                BudgetType::Education,
                BudgetType::Healthcare,
                BudgetType::Defense,
                BudgetType::Infrastructure,
                BudgetType::PublicAdministration,
                BudgetType::DebtInterest,
                BudgetType::OtherSpending,
            ],
        }
    }
}

/// One (year, category, type, amount) fact extracted from a source table or
/// entered manually.
///
/// The `amount` is strictly positive: construction discards anything else, so
/// malformed or subtotal-ish rows never enter the model.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BudgetLineItem {
    year: i32,
    category: Category,
    budget_type: BudgetType,
    amount: Amount,
    description: String,
}

impl BudgetLineItem {
    /// Creates a line item. Returns `None` when `amount` is not strictly
    /// positive.
    pub fn new(
        year: i32,
        category: Category,
        budget_type: BudgetType,
        amount: Amount,
        description: impl Into<String>,
    ) -> Option<Self> {
        if !amount.is_positive() {
            return None;
        }
        Some(Self {
            year,
            category,
            budget_type,
            amount,
            description: description.into(),
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn budget_type(&self) -> BudgetType {
        self.budget_type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_budget_type_round_trip() {
        let s = BudgetType::PersonalIncomeTax.to_string();
        assert_eq!(s, "personal_income_tax");
        assert_eq!(
            BudgetType::from_str(&s).unwrap(),
            BudgetType::PersonalIncomeTax
        );
    }

    #[test]
    fn test_catch_all() {
        assert_eq!(
            BudgetType::catch_all(Category::Income),
            BudgetType::OtherRevenues
        );
        assert_eq!(
            BudgetType::catch_all(Category::Spending),
            BudgetType::OtherSpending
        );
    }

    #[test]
    fn test_every_type_belongs_to_its_listing() {
        for &category in &[Category::Income, Category::Spending] {
            for budget_type in BudgetType::all(category) {
                assert_eq!(budget_type.category(), category);
            }
        }
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        assert!(BudgetLineItem::new(
            2024,
            Category::Income,
            BudgetType::Vat,
            Amount::new(dec!(0)),
            "IVA",
        )
        .is_none());
        assert!(BudgetLineItem::new(
            2024,
            Category::Income,
            BudgetType::Vat,
            Amount::new(dec!(-5)),
            "IVA",
        )
        .is_none());
    }

    #[test]
    fn test_accepts_positive_amount() {
        let item = BudgetLineItem::new(
            2024,
            Category::Income,
            BudgetType::Vat,
            Amount::new(dec!(100)),
            "IVA",
        )
        .unwrap();
        assert_eq!(item.year(), 2024);
        assert_eq!(item.budget_type(), BudgetType::Vat);
        assert_eq!(item.amount().value(), dec!(100));
    }
}
