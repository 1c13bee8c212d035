//! Command line interface

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Daily market brief generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// `serve` when no subcommand is given
    pub fn action(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP trigger (default)
    Serve,

    /// Generate and publish one brief, print the response and exit
    Once,

    /// Print the display and target dates
    Dates {
        /// Reference day (YYYY-MM-DD); today in BRIEF_TIMEZONE if omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}
