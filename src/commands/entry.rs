//! The `fisco entry` commands.

use crate::args::{EntryAddArgs, EntryListArgs};
use crate::commands::Out;
use crate::model::BudgetLineItem;
use crate::pipeline::classify;
use crate::store::{EntryFilter, EntryStore};
use crate::Result;
use anyhow::{bail, Context};

/// Validates and stores one manually entered line item.
pub async fn entry_add(store: &dyn EntryStore, args: &EntryAddArgs) -> Result<Out<BudgetLineItem>> {
    let budget_type = args
        .budget_type()
        .unwrap_or_else(|| classify(args.concept(), args.category()));
    if budget_type.category() != args.category() {
        bail!(
            "The type '{budget_type}' does not belong to the {} category",
            args.category()
        );
    }
    let item = BudgetLineItem::new(
        args.year(),
        args.category(),
        budget_type,
        args.amount(),
        args.concept(),
    )
    .context("The amount must be strictly positive")?;
    store.create(&item).await?;
    Ok(Out::new(
        format!(
            "Stored a {budget_type} entry of {} for {}",
            item.amount(),
            item.year()
        ),
        item,
    ))
}

/// Lists stored entries matching the optional year and category filters.
pub async fn entry_list(
    store: &dyn EntryStore,
    args: &EntryListArgs,
) -> Result<Out<Vec<BudgetLineItem>>> {
    let items = store
        .query(EntryFilter::new(args.year(), args.category()))
        .await?;
    let message = match items.len() {
        0 => String::from("No entries found"),
        1 => String::from("Found 1 entry"),
        n => format!("Found {n} entries"),
    };
    Ok(Out::new(message, items))
}

/// Lists the distinct years that have stored entries.
pub async fn entry_years(store: &dyn EntryStore) -> Result<Out<Vec<i32>>> {
    let years = store.distinct_years().await?;
    let message = if years.is_empty() {
        String::from("No entries stored")
    } else {
        format!(
            "Entries exist for: {}",
            years
                .iter()
                .map(i32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        )
    };
    Ok(Out::new(message, years))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{parse_amount, BudgetType, Category};
    use crate::test::TestEnv;

    fn add_args(concept: &str, budget_type: Option<BudgetType>) -> EntryAddArgs {
        EntryAddArgs::new(
            2024,
            Category::Income,
            parse_amount("1.000,00"),
            concept,
            budget_type,
        )
    }

    #[tokio::test]
    async fn test_add_classifies_concept_when_type_omitted() {
        let env = TestEnv::new().await;
        let store = env.store().await;

        let out = entry_add(&store, &add_args("IRPF", None)).await.unwrap();
        assert_eq!(
            out.structure().unwrap().budget_type(),
            BudgetType::PersonalIncomeTax
        );
    }

    #[tokio::test]
    async fn test_add_rejects_type_from_the_other_category() {
        let env = TestEnv::new().await;
        let store = env.store().await;

        let result = entry_add(&store, &add_args("IRPF", Some(BudgetType::Pensions))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_add_then_list_and_years() {
        let env = TestEnv::new().await;
        let store = env.store().await;

        entry_add(&store, &add_args("IRPF", None)).await.unwrap();
        entry_add(&store, &add_args("IVA", None)).await.unwrap();

        let list = entry_list(&store, &EntryListArgs::new(Some(2024), None))
            .await
            .unwrap();
        assert_eq!(list.structure().unwrap().len(), 2);
        assert_eq!(list.message(), "Found 2 entries");

        let years = entry_years(&store).await.unwrap();
        assert_eq!(years.structure().unwrap(), &vec![2024]);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let env = TestEnv::new().await;
        let store = env.store().await;
        let list = entry_list(&store, &EntryListArgs::new(None, None))
            .await
            .unwrap();
        assert!(list.structure().unwrap().is_empty());
        assert_eq!(list.message(), "No entries found");
    }
}
