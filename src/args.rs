//! These structs provide the CLI interface for the fisco CLI.

use crate::model::{Amount, BudgetType, Category};
use crate::utils;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// fisco: a command-line tool for summarizing public budget data.
///
/// The program ingests CSV extracts of a government's yearly income and
/// spending — dropped into the data directory or fetched from a configured
/// remote endpoint — normalizes them into a fixed taxonomy of budget line
/// items, and prints a yearly income/spending/balance summary. When no data
/// can be extracted for a year, a fixed baseline dataset is returned so a
/// summary is always available.
///
/// Manual entries can be recorded with the `entry` subcommands and are
/// merged into summaries for their year.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the fisco home directory and initialize the configuration file
    /// and database.
    ///
    /// This is the first command you should run. By default the home
    /// directory is $HOME/fisco; pass --fisco-home to put it somewhere else.
    /// Drop your CSV extracts into the `data` subdirectory afterwards, or
    /// configure --endpoint so missing years can be fetched remotely.
    Init(InitArgs),
    /// Produce the income/spending/balance summary for a budget year.
    Summary(SummaryArgs),
    /// Record and inspect manually entered budget line items.
    Entry(EntryArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where fisco data and configuration is held. Defaults to
    /// ~/fisco
    #[arg(long, env = "FISCO_HOME", default_value_t = default_fisco_home())]
    fisco_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, fisco_home: PathBuf) -> Self {
        Self {
            log_level,
            fisco_home: fisco_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn fisco_home(&self) -> &DisplayPath {
        &self.fisco_home
    }
}

/// Args for the `fisco init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The remote endpoint URL template, containing a `{year}` placeholder,
    /// under which candidate filenames are probed. A default is written when
    /// omitted.
    #[arg(long)]
    endpoint: Option<String>,
}

impl InitArgs {
    pub fn new(endpoint: Option<String>) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

/// Args for the `fisco summary` command.
#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    /// The budget year to summarize, e.g. 2024
    year: i32,

    /// Print the summary as a JSON document on stdout.
    #[arg(long)]
    json: bool,
}

impl SummaryArgs {
    pub fn new(year: i32, json: bool) -> Self {
        Self { year, json }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn json(&self) -> bool {
        self.json
    }
}

/// Args for the `fisco entry` command.
#[derive(Debug, Parser, Clone)]
pub struct EntryArgs {
    #[command(subcommand)]
    entity: EntrySubcommand,
}

impl EntryArgs {
    pub fn new(entity: EntrySubcommand) -> Self {
        Self { entity }
    }

    pub fn entity(&self) -> &EntrySubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum EntrySubcommand {
    /// Record one budget line item.
    Add(EntryAddArgs),
    /// List stored entries, optionally filtered by year and category.
    List(EntryListArgs),
    /// List the distinct years that have stored entries.
    Years,
}

/// Args for the `fisco entry add` command.
#[derive(Debug, Parser, Clone)]
pub struct EntryAddArgs {
    /// The budget year the entry belongs to.
    #[arg(long)]
    year: i32,

    /// Whether this is income or spending.
    #[arg(long)]
    category: Category,

    /// The amount in euros. Accepts formatted values such as "1.234,56".
    #[arg(long, value_parser = utils::parse_amount_arg)]
    amount: Amount,

    /// The concept text describing the entry, e.g. "IRPF".
    #[arg(long)]
    concept: String,

    /// The taxonomy type, e.g. personal_income_tax. Classified from the
    /// concept text when omitted.
    #[arg(long)]
    budget_type: Option<BudgetType>,
}

impl EntryAddArgs {
    pub fn new(
        year: i32,
        category: Category,
        amount: Amount,
        concept: impl Into<String>,
        budget_type: Option<BudgetType>,
    ) -> Self {
        Self {
            year,
            category,
            amount,
            concept: concept.into(),
            budget_type,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn concept(&self) -> &str {
        &self.concept
    }

    pub fn budget_type(&self) -> Option<BudgetType> {
        self.budget_type
    }
}

/// Args for the `fisco entry list` command.
#[derive(Debug, Parser, Clone)]
pub struct EntryListArgs {
    /// Only list entries for this year.
    #[arg(long)]
    year: Option<i32>,

    /// Only list entries in this category.
    #[arg(long)]
    category: Option<Category>,
}

impl EntryListArgs {
    pub fn new(year: Option<i32>, category: Option<Category>) -> Self {
        Self { year, category }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }
}

fn default_fisco_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("fisco"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --fisco-home or FISCO_HOME instead of relying on the default \
                fisco home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("fisco")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
