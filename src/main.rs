use clap::Parser;
use fisco::args::{Args, Command, EntrySubcommand};
use fisco::store::{EntryStore, NoopStore, SqliteStore};
use fisco::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().fisco_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.endpoint()).await?.print(),

        Command::Summary(summary_args) => {
            let config = Config::load(home).await?;
            let store = open_store(&config).await?;
            let out = commands::summary(&config, store.as_ref(), summary_args).await?;
            if summary_args.json() {
                out.print_json()?
            } else {
                out.print()
            }
        }

        Command::Entry(entry_args) => {
            let config = Config::load(home).await?;
            if !config.persistence() {
                anyhow::bail!("Persistence is disabled in config.json, entry commands are unavailable")
            }
            let store = SqliteStore::load(config.sqlite_path()).await?;
            match entry_args.entity() {
                EntrySubcommand::Add(add_args) => {
                    commands::entry_add(&store, add_args).await?.print()
                }
                EntrySubcommand::List(list_args) => {
                    commands::entry_list(&store, list_args).await?.print()
                }
                EntrySubcommand::Years => commands::entry_years(&store).await?.print(),
            }
        }
    };
    Ok(())
}

/// Opens the entry store according to configuration: SQLite when persistence
/// is enabled, otherwise a no-op store.
async fn open_store(config: &Config) -> Result<Box<dyn EntryStore>> {
    if config.persistence() {
        Ok(Box::new(SqliteStore::load(config.sqlite_path()).await?))
    } else {
        Ok(Box::new(NoopStore))
    }
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
