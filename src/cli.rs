//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use macro_config::ReadOnlyMode;
use macro_logger::LogLevel;

/// Terminal text editor with a command palette.
#[derive(Debug, Parser)]
#[command(name = "macro", version, about)]
pub struct Args {
    /// File to open (created on first save), or a directory to pick from
    pub file: Option<PathBuf>,

    /// Open files read-only
    #[arg(long, conflicts_with = "rw")]
    pub ro: bool,

    /// Open files writable unless their permissions forbid it
    #[arg(long)]
    pub rw: bool,

    /// Minimum log level: debug, info, warn or error
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl Args {
    /// Read-only mode requested on the command line, if any.
    pub fn read_only_mode(&self) -> Option<ReadOnlyMode> {
        if self.ro {
            Some(ReadOnlyMode::Ro)
        } else if self.rw {
            Some(ReadOnlyMode::Rw)
        } else {
            None
        }
    }
}
