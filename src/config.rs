//! Configuration file handling.
//!
//! The configuration file is stored at `$FISCO_HOME/config.json` and holds
//! the remote endpoint template, the probe timeout and the persistence
//! switch. The home directory also contains the `data` directory where CSV
//! extracts are dropped, and the SQLite database for manual entries.

use crate::{utils, Result};
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "fisco";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const FISCO_SQLITE: &str = "fisco.sqlite";
const DATA_DIR: &str = "data";
const DEFAULT_ENDPOINT_TEMPLATE: &str = "https://presupuestos.example.org/{year}";
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 12;

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to `$FISCO_HOME` and from there it
/// loads `$FISCO_HOME/config.json`. It provides paths to the other items
/// expected at known locations within the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    data_dir: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    sqlite_path: PathBuf,
}

impl Config {
    /// Creates the home directory and its `data` subdirectory, and writes an
    /// initial `config.json` using `endpoint_template` (or the default) with
    /// default settings.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the home directory,
    ///   e.g. `$HOME/fisco`
    /// - `endpoint_template` - The remote endpoint URL template, containing a
    ///   `{year}` placeholder, that candidate filenames are probed under.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, endpoint_template: Option<&str>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).await?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let data_dir = root.join(DATA_DIR);
        utils::make_dir(&data_dir).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            endpoint_template: endpoint_template
                .unwrap_or(DEFAULT_ENDPOINT_TEMPLATE)
                .to_string(),
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            persistence: true,
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            sqlite_path: root.join(FISCO_SQLITE),
            root,
            data_dir,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that the home directory and the config file exist
    /// - load the config file
    /// - validate that the data directory exists
    /// - return the loaded configuration object
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let data_dir = root.join(DATA_DIR);
        if !data_dir.is_dir() {
            bail!("The data directory is missing '{}'", data_dir.display())
        }

        Ok(Self {
            sqlite_path: root.join(FISCO_SQLITE),
            root,
            data_dir,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The directory where CSV extracts are searched for.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn sqlite_path(&self) -> &Path {
        &self.sqlite_path
    }

    /// The remote endpoint URL template with its `{year}` placeholder.
    pub fn endpoint_template(&self) -> &str {
        &self.config_file.endpoint_template
    }

    /// The per-attempt timeout for remote probes.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.config_file.probe_timeout_secs)
    }

    /// Whether the manual-entry store is enabled.
    pub fn persistence(&self) -> bool {
        self.config_file.persistence
    }
}

/// Represents the serialization and deserialization format of the
/// configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "fisco",
///   "config_version": 1,
///   "endpoint_template": "https://presupuestos.example.org/{year}",
///   "probe_timeout_secs": 12,
///   "persistence": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "fisco"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// URL template of the remote budget endpoint, with a `{year}`
    /// placeholder
    endpoint_template: String,

    /// Seconds to wait for each remote probe attempt
    #[serde(default = "default_probe_timeout_secs")]
    probe_timeout_secs: u64,

    /// Whether manual entries are persisted to the SQLite database
    #[serde(default = "default_persistence")]
    persistence: bool,
}

fn default_probe_timeout_secs() -> u64 {
    DEFAULT_PROBE_TIMEOUT_SECS
}

fn default_persistence() -> bool {
    true
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            endpoint_template: DEFAULT_ENDPOINT_TEMPLATE.to_string(),
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            persistence: true,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;
        let config: ConfigFile = serde_json::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        utils::write(path, data).await
    }
}
