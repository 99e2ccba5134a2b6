//! Terminal host for the ledger grid. Each invocation handles one command against the file
//! store and prints the resulting grid.

mod args;
mod handlers;
pub mod io;

use clap::Parser;

use crate::errors::LedgerError;

pub use args::{Cli, Command};
pub use handlers::{parse_column, run};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

/// Parses process arguments and runs the selected command.
pub fn run_cli() -> Result<(), CommandError> {
    run(Cli::parse())
}
