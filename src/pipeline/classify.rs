//! Keyword classification of free-text budget concepts.
//!
//! Classification is an ordered rule table evaluated in sequence: the first
//! rule with a matching keyword wins. Concepts routinely match more than one
//! rule ("Transferencias a la Seguridad Social" matches both the social
//! security and the transfer rules), so rule order is part of the contract
//! and is covered by tests.

use crate::model::{BudgetType, Category};

/// One classification rule: a substring hit on any keyword assigns the type.
struct Rule {
    keywords: &'static [&'static str],
    budget_type: BudgetType,
}

/// Income rules in evaluation order. Keywords are lowercase; concepts are
/// lowercased before matching.
const INCOME_RULES: &[Rule] = &[
    Rule {
        keywords: &["irpf", "impuestos directos", "renta"],
        budget_type: BudgetType::PersonalIncomeTax,
    },
    Rule {
        keywords: &["sociedades"],
        budget_type: BudgetType::CorporateTax,
    },
    Rule {
        keywords: &["iva", "valor añadido", "impuestos indirectos"],
        budget_type: BudgetType::Vat,
    },
    Rule {
        keywords: &["cotizaciones", "seguridad social"],
        budget_type: BudgetType::SocialSecurityContributions,
    },
    Rule {
        keywords: &["comunidades autónomas", "autonómic", "tributos cedidos"],
        budget_type: BudgetType::AutonomousCommunitiesTaxes,
    },
    Rule {
        keywords: &["unión europea", "fondos europeos", "feder"],
        budget_type: BudgetType::EuFunds,
    },
    Rule {
        keywords: &["tasas", "transferencias"],
        budget_type: BudgetType::OtherRevenues,
    },
];

/// Spending rules in evaluation order.
const SPENDING_RULES: &[Rule] = &[
    Rule {
        keywords: &["pensiones", "clases pasivas"],
        budget_type: BudgetType::Pensions,
    },
    Rule {
        keywords: &["seguridad social", "prestaciones"],
        budget_type: BudgetType::SocialSecurity,
    },
    Rule {
        keywords: &["educación", "becas"],
        budget_type: BudgetType::Education,
    },
    Rule {
        keywords: &["sanidad", "salud", "farmacia"],
        budget_type: BudgetType::Healthcare,
    },
    Rule {
        keywords: &["defensa", "militar"],
        budget_type: BudgetType::Defense,
    },
    Rule {
        keywords: &["infraestructura", "carreteras", "fomento", "transporte"],
        budget_type: BudgetType::Infrastructure,
    },
    Rule {
        keywords: &["administración", "personal", "funcionarios", "órganos"],
        budget_type: BudgetType::PublicAdministration,
    },
    Rule {
        keywords: &["deuda", "intereses"],
        budget_type: BudgetType::DebtInterest,
    },
    Rule {
        keywords: &[
            "transferencias",
            "contingencia",
            "inversiones",
            "desempleo",
            "paro",
        ],
        budget_type: BudgetType::OtherSpending,
    },
];

/// Maps a free-text concept plus its category to a budget type.
///
/// Falls through to the category's catch-all when no keyword matches.
pub fn classify(concept: &str, category: Category) -> BudgetType {
    let concept = concept.to_lowercase();
    let rules = match category {
        Category::Income => INCOME_RULES,
        Category::Spending => SPENDING_RULES,
    };
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| concept.contains(kw)))
        .map(|rule| rule.budget_type)
        .unwrap_or_else(|| BudgetType::catch_all(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irpf_is_personal_income_tax() {
        assert_eq!(
            classify("IRPF", Category::Income),
            BudgetType::PersonalIncomeTax
        );
    }

    #[test]
    fn test_direct_taxes_are_personal_income_tax() {
        assert_eq!(
            classify("Impuestos directos", Category::Income),
            BudgetType::PersonalIncomeTax
        );
    }

    #[test]
    fn test_indirect_taxes_are_vat() {
        // "impuestos indirectos" must not hit the direct-tax rule above it.
        assert_eq!(
            classify("Impuestos indirectos", Category::Income),
            BudgetType::Vat
        );
    }

    #[test]
    fn test_contributory_pensions() {
        assert_eq!(
            classify("Pensiones contributivas", Category::Spending),
            BudgetType::Pensions
        );
    }

    #[test]
    fn test_unmatched_income_falls_to_other_revenues() {
        assert_eq!(
            classify("xyz-unmatched", Category::Income),
            BudgetType::OtherRevenues
        );
    }

    #[test]
    fn test_unmatched_spending_falls_to_other_spending() {
        assert_eq!(
            classify("xyz-unmatched", Category::Spending),
            BudgetType::OtherSpending
        );
    }

    #[test]
    fn test_rule_order_social_security_before_transfers() {
        assert_eq!(
            classify("Transferencias a la Seguridad Social", Category::Spending),
            BudgetType::SocialSecurity
        );
    }

    #[test]
    fn test_rule_order_pensions_before_social_security() {
        assert_eq!(
            classify("Pensiones de la Seguridad Social", Category::Spending),
            BudgetType::Pensions
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(
            classify("INTERESES DE LA DEUDA", Category::Spending),
            BudgetType::DebtInterest
        );
    }

    #[test]
    fn test_eu_funds() {
        assert_eq!(
            classify("Fondos europeos Next Generation", Category::Income),
            BudgetType::EuFunds
        );
    }

    #[test]
    fn test_category_disambiguates_shared_keywords() {
        // "seguridad social" is contributions on the income side but a
        // spending program on the other.
        assert_eq!(
            classify("Cuotas a la Seguridad Social", Category::Income),
            BudgetType::SocialSecurityContributions
        );
        assert_eq!(
            classify("Aportación a la Seguridad Social", Category::Spending),
            BudgetType::SocialSecurity
        );
    }
}
