//! SQLite-backed implementation of the manual-entry store.

use crate::model::{Amount, BudgetLineItem, BudgetType, Category};
use crate::store::{migrations, EntryFilter, EntryStore};
use crate::Result;
use anyhow::{bail, Context};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

/// The schema version this build of the program expects.
const SCHEMA_VERSION: i32 = 1;

/// One row of the `entries` table: (year, category, budget_type, amount,
/// description).
type EntryRow = (i64, String, String, String, String);

const SELECT: &str = "SELECT year, category, budget_type, amount, description FROM entries";

/// The manual-entry store backed by a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a new SQLite file at `path`, initializes the schema and
    /// returns a ready store. Errors if a file already exists there.
    pub async fn init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            bail!("A database file already exists at '{}'", path.display());
        }
        let pool = connect(path, true).await?;
        sqlx::query("CREATE TABLE schema_version (version INTEGER NOT NULL)")
            .execute(&pool)
            .await
            .context("Unable to create the schema_version table")?;
        sqlx::query("INSERT INTO schema_version (version) VALUES (0)")
            .execute(&pool)
            .await
            .context("Unable to record the initial schema version")?;
        migrations::run(&pool, 0, SCHEMA_VERSION).await?;
        Ok(Self { pool })
    }

    /// Opens the SQLite file at `path`, migrating the schema if it is
    /// out of date.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!(
                "There is no database file at '{}', run init first",
                path.display()
            );
        }
        let pool = connect(path, false).await?;
        let (current,): (i32,) = sqlx::query_as("SELECT MAX(version) FROM schema_version")
            .fetch_one(&pool)
            .await
            .context("Unable to read the schema version")?;
        migrations::run(&pool, current, SCHEMA_VERSION).await?;
        Ok(Self { pool })
    }
}

async fn connect(path: &Path, create: bool) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
        .context("Unable to parse the SQLite connection string")?
        .create_if_missing(create);
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Unable to open the SQLite database at '{}'", path.display()))
}

fn row_to_item(row: EntryRow) -> Result<BudgetLineItem> {
    let (year, category, budget_type, amount, description) = row;
    let category =
        Category::from_str(&category).with_context(|| format!("Bad stored category '{category}'"))?;
    let budget_type = BudgetType::from_str(&budget_type)
        .with_context(|| format!("Bad stored budget type '{budget_type}'"))?;
    let amount =
        Amount::from_str(&amount).with_context(|| format!("Bad stored amount '{amount}'"))?;
    BudgetLineItem::new(year as i32, category, budget_type, amount, description)
        .context("A stored entry has a non-positive amount")
}

#[async_trait]
impl EntryStore for SqliteStore {
    async fn create(&self, item: &BudgetLineItem) -> Result<()> {
        sqlx::query(
            "INSERT INTO entries (id, year, category, budget_type, amount, description, created_at) \
            VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(item.year())
        .bind(item.category().to_string())
        .bind(item.budget_type().to_string())
        .bind(item.amount().value().to_string())
        .bind(item.description())
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Unable to insert the entry")?;
        Ok(())
    }

    async fn query(&self, filter: EntryFilter) -> Result<Vec<BudgetLineItem>> {
        let rows: Vec<EntryRow> = match (filter.year(), filter.category()) {
            (Some(year), Some(category)) => {
                sqlx::query_as(&format!(
                    "{SELECT} WHERE year = ? AND category = ? ORDER BY created_at"
                ))
                .bind(year)
                .bind(category.to_string())
                .fetch_all(&self.pool)
                .await
            }
            (Some(year), None) => {
                sqlx::query_as(&format!("{SELECT} WHERE year = ? ORDER BY created_at"))
                    .bind(year)
                    .fetch_all(&self.pool)
                    .await
            }
            (None, Some(category)) => {
                sqlx::query_as(&format!("{SELECT} WHERE category = ? ORDER BY created_at"))
                    .bind(category.to_string())
                    .fetch_all(&self.pool)
                    .await
            }
            (None, None) => {
                sqlx::query_as(&format!("{SELECT} ORDER BY created_at"))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .context("Unable to query entries")?;

        rows.into_iter().map(row_to_item).collect()
    }

    async fn distinct_years(&self) -> Result<Vec<i32>> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT DISTINCT year FROM entries ORDER BY year")
            .fetch_all(&self.pool)
            .await
            .context("Unable to query the stored years")?;
        Ok(rows.into_iter().map(|(year,)| year as i32).collect())
    }
}
