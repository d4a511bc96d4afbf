//! Database schema migrations.
//!
//! Migration SQL lives next to this module with the naming convention
//! `migration_NN_up.sql` / `migration_NN_down.sql`, where `NN` is the
//! version the up script produces. Each script runs in a transaction
//! together with the `schema_version` update.

use anyhow::{bail, Context};
use sqlx::{Executor, SqlitePool};
use tracing::debug;

use crate::Result;

/// A schema migration with up and down SQL.
struct Migration {
    /// The version this migration brings the database to when going up.
    version: i32,
    up_sql: &'static str,
    down_sql: &'static str,
}

/// All available migrations in order.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    up_sql: include_str!("migration_01_up.sql"),
    down_sql: include_str!("migration_01_down.sql"),
}];

/// Migrates the database from `current_ver` to `target_ver`, in either
/// direction. Missing migrations are detected before anything runs.
pub(crate) async fn run(pool: &SqlitePool, current_ver: i32, target_ver: i32) -> Result<()> {
    if current_ver == target_ver {
        debug!("Database already at schema version {target_ver}");
        return Ok(());
    }

    let mut steps: Vec<(i32, &'static str, i32)> = Vec::new();
    if current_ver < target_ver {
        for version in (current_ver + 1)..=target_ver {
            let migration = find_migration(version, current_ver, target_ver)?;
            steps.push((version, migration.up_sql, version));
        }
    } else {
        for version in ((target_ver + 1)..=current_ver).rev() {
            let migration = find_migration(version, current_ver, target_ver)?;
            steps.push((version, migration.down_sql, version - 1));
        }
    }

    for (version, sql, resulting_version) in steps {
        debug!("Running migration {version:02} to reach version {resulting_version}");
        apply(pool, sql, resulting_version).await?;
    }

    debug!("Schema now at version {target_ver}");
    Ok(())
}

fn find_migration(version: i32, current_ver: i32, target_ver: i32) -> Result<&'static Migration> {
    match MIGRATIONS.iter().find(|m| m.version == version) {
        Some(migration) => Ok(migration),
        None => bail!(
            "Migration {version} is missing but required to go from schema version \
            {current_ver} to {target_ver}"
        ),
    }
}

/// Executes one migration's SQL and records the resulting schema version,
/// all within a transaction.
async fn apply(pool: &SqlitePool, sql: &str, resulting_version: i32) -> Result<()> {
    let mut tx = pool
        .begin()
        .await
        .context("Unable to begin the migration transaction")?;

    tx.execute(sql)
        .await
        .context("Unable to execute the migration SQL")?;

    sqlx::query("DELETE FROM schema_version")
        .execute(&mut *tx)
        .await
        .context("Unable to clear schema_version")?;
    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(resulting_version)
        .execute(&mut *tx)
        .await
        .context("Unable to record the schema version")?;

    tx.commit()
        .await
        .context("Unable to commit the migration transaction")
}
