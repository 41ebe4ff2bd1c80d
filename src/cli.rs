//! Command-line argument parsing
//!
//! Supports:
//! - Candidates from arguments or piped stdin
//! - An explicit config file
//! - Listing and checking the effective bindings

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

use clap::Parser;

/// Pick lines interactively with configurable key sequences
#[derive(Parser, Debug)]
#[command(name = "chordmap", version, about = "Pick lines interactively with configurable key sequences")]
pub struct CliArgs {
    /// Candidates to choose from (read from stdin when omitted)
    #[arg(value_name = "CANDIDATES")]
    pub candidates: Vec<String>,

    /// Config file to use instead of ~/.config/chordmap/config.yaml
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the effective key bindings and exit
    #[arg(short, long)]
    pub list: bool,

    /// Validate the configuration and exit (non-zero on problems)
    #[arg(long, conflicts_with = "list")]
    pub check: bool,
}

impl CliArgs {
    /// Candidates from the command line, or else non-empty lines of piped stdin
    pub fn read_candidates(&self) -> io::Result<Vec<String>> {
        if !self.candidates.is_empty() || io::stdin().is_terminal() {
            return Ok(self.candidates.clone());
        }
        io::stdin()
            .lock()
            .lines()
            .filter(|line| !matches!(line, Ok(l) if l.is_empty()))
            .collect()
    }
}
