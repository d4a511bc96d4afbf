//! The `fisco init` command.

use crate::commands::Out;
use crate::store::SqliteStore;
use crate::{Config, Result};
use std::path::Path;

/// Creates the fisco home directory, writes the initial `config.json` and
/// initializes the SQLite database.
pub async fn init(home: &Path, endpoint: Option<&str>) -> Result<Out<()>> {
    let config = Config::create(home, endpoint).await?;
    let _ = SqliteStore::init(config.sqlite_path()).await?;
    Ok(Out::new_message(format!(
        "Initialized fisco home at '{}'. Drop CSV extracts into '{}'.",
        config.root().display(),
        config.data_dir().display(),
    )))
}
