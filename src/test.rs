//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Amount, BudgetLineItem, BudgetType, Category};
use crate::store::{EntryStore, SqliteStore};
use crate::Config;
use tempfile::TempDir;

/// Test environment that sets up a fisco home directory with Config and
/// database. Holds TempDir to keep the directory alive for the duration of
/// the test.
///
/// The endpoint template points at a closed local port so that a test which
/// accidentally reaches the network probe fails fast instead of making real
/// requests.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with Config and initialized database.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("fisco");
        let config = Config::create(&root, Some("http://127.0.0.1:9/{year}"))
            .await
            .unwrap();
        SqliteStore::init(config.sqlite_path()).await.unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Opens the store belonging to this environment.
    pub async fn store(&self) -> SqliteStore {
        SqliteStore::load(self.config.sqlite_path()).await.unwrap()
    }

    /// Drops a CSV extract into the data directory.
    pub fn write_extract(&self, filename: &str, contents: &str) {
        std::fs::write(self.config.data_dir().join(filename), contents).unwrap();
    }

    /// Stores one entry with the given euro amount.
    pub async fn add_entry(
        &self,
        store: &SqliteStore,
        year: i32,
        category: Category,
        budget_type: BudgetType,
        euros: i64,
    ) {
        let item = BudgetLineItem::new(
            year,
            category,
            budget_type,
            Amount::new(euros.into()),
            "test entry",
        )
        .unwrap();
        store.create(&item).await.unwrap();
    }
}
