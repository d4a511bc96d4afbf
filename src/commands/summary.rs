//! The `fisco summary` command.

use crate::api::RemoteSource;
use crate::args::SummaryArgs;
use crate::commands::Out;
use crate::model::BudgetSummary;
use crate::pipeline;
use crate::store::EntryStore;
use crate::{Config, Result};

/// Runs the pipeline for the requested year.
///
/// Once the pipeline starts it cannot fail — the baseline dataset covers
/// total extraction failure — so errors here can only come from a broken
/// endpoint template.
pub async fn summary(
    config: &Config,
    store: &dyn EntryStore,
    args: &SummaryArgs,
) -> Result<Out<BudgetSummary>> {
    let remote = RemoteSource::new(config.endpoint_template(), config.probe_timeout())?;
    let summary = pipeline::summarize(config, &remote, store, args.year()).await;
    let message = format!(
        "{}: income {}, spending {}, balance {} ({} data)",
        summary.year(),
        summary.income().total(),
        summary.spending().total(),
        summary.balance(),
        summary.data_source(),
    );
    Ok(Out::new(message, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BudgetType, Category, DataSource};
    use crate::pipeline::baseline;
    use crate::store::NoopStore;
    use crate::test::TestEnv;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_summary_from_year_columns_extracts() {
        let env = TestEnv::new().await;
        env.write_extract("ingresos.csv", "Concepto,2024\nIRPF,100.0\nIVA,50.0\n");
        env.write_extract("gastos.csv", "Concepto,2024\nPensiones,80.0\n");

        let out = summary(&env.config(), &NoopStore, &SummaryArgs::new(2024, false))
            .await
            .unwrap();
        let result = out.structure().unwrap();

        assert_eq!(result.data_source(), DataSource::Real);
        assert_eq!(result.income().total().value(), dec!(150000000));
        assert_eq!(result.spending().total().value(), dec!(80000000));
        assert_eq!(result.balance().value(), dec!(70000000));
        assert!(out.message().contains("real data"));
    }

    #[tokio::test]
    async fn test_summary_falls_back_to_baseline() {
        let env = TestEnv::new().await;

        let out = summary(&env.config(), &NoopStore, &SummaryArgs::new(2024, false))
            .await
            .unwrap();
        let result = out.structure().unwrap();

        assert_eq!(result, &baseline::summary(2024));
        assert_eq!(result.data_source(), DataSource::Hardcoded);
    }

    #[tokio::test]
    async fn test_summary_merges_stored_entries() {
        let env = TestEnv::new().await;
        env.write_extract("ingresos.csv", "Concepto,2024\nIVA,1.0\n");
        let store = env.store().await;
        env.add_entry(&store, 2024, Category::Income, BudgetType::Vat, 500_000)
            .await;

        let out = summary(&env.config(), &store, &SummaryArgs::new(2024, false))
            .await
            .unwrap();
        let result = out.structure().unwrap();

        // 1.0 million from the extract plus the stored 500k, in one entry.
        assert_eq!(result.income().items().len(), 1);
        assert_eq!(result.income().items()[0].total().value(), dec!(1500000));
    }

    #[tokio::test]
    async fn test_summary_for_missing_year_is_baseline_not_other_years() {
        let env = TestEnv::new().await;
        env.write_extract("ingresos.csv", "Concepto,2022,2023\nIRPF,10.0,11.0\n");

        let out = summary(&env.config(), &NoopStore, &SummaryArgs::new(2024, false))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().data_source(), DataSource::Hardcoded);
    }
}
