//! Command handlers for the fisco CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod entry;
mod init;
mod summary;

use serde::Serialize;
use std::fmt::Debug;
use tracing::info;

pub use entry::{entry_add, entry_list, entry_years};
pub use init::init;
pub use summary::summary;

/// The output type for a command: a message for the user plus, optionally,
/// the structured data the command produced.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of
    /// the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!`.
    pub fn print(&self) {
        info!("{}", self.message);
    }

    /// Print the structured data (when it exists) as pretty JSON on stdout.
    pub fn print_json(&self) -> crate::Result<()> {
        if let Some(structure) = self.structure() {
            println!("{}", serde_json::to_string_pretty(structure)?);
        }
        Ok(())
    }
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}
