//! CLI subcommand definitions

use clap::Subcommand;
use std::path::PathBuf;

/// Main CLI commands
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Summarize a transaction file by category (default)
    Summary {
        /// CSV or spreadsheet export to read
        file: PathBuf,
    },
    /// Show the date window each period resolves to
    Periods,
    /// Show the unfiltered rows of a file
    Raw {
        /// CSV or spreadsheet export to read
        file: PathBuf,
        /// Maximum rows to print
        #[arg(short = 'n', long, default_value_t = 50)]
        limit: usize,
    },
}

/// Normalized command after resolving the top-level shorthand
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Summary(PathBuf),
    Periods,
    Raw { file: PathBuf, limit: usize },
    /// No subcommand and no file
    Missing,
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Summary { file } => Command::Summary(file),
            Commands::Periods => Command::Periods,
            Commands::Raw { file, limit } => Command::Raw { file, limit },
        }
    }
}

/// `txsummary FILE` is shorthand for `txsummary summary FILE`
pub(crate) fn parse_command(cmd: Option<Commands>, file: Option<PathBuf>) -> Command {
    match (cmd, file) {
        (Some(cmd), _) => Command::from(cmd),
        (None, Some(file)) => Command::Summary(file),
        (None, None) => Command::Missing,
    }
}
