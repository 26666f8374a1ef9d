//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    ApproveCommand, CancelCommand, CheckAvailabilityCommand, CompletionsCommand, CreateCommand,
    DeleteCommand, GetCommand, InitCommand, ListCommand, UpdateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing room reservations.
#[derive(Parser)]
#[command(name = "roombook")]
#[command(version, about = "Manage room reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "ROOMBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "ROOMBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(
        long,
        global = true,
        env = "ROOMBOOK_DISABLE_AUTOINIT",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Create a pending reservation
    Create(CreateCommand),

    /// Show a single reservation
    Get(GetCommand),

    /// List or search reservations
    List(ListCommand),

    /// Replace the details of a pending reservation
    Update(UpdateCommand),

    /// Cancel a pending reservation
    Cancel(CancelCommand),

    /// Delete a reservation
    Delete(DeleteCommand),

    /// Approve a pending reservation
    Approve(ApproveCommand),

    /// Check whether a room is free for a date range
    CheckAvailability(CheckAvailabilityCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "roombook",
            "approve",
            "3",
            "--data-dir",
            "/tmp/rb",
            "--busy-timeout",
            "9",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/rb")));
        assert_eq!(cli.busy_timeout, Some(9));
        assert!(matches!(cli.command, Command::Approve(_)));
    }

    #[test]
    fn test_create_requires_all_fields() {
        let result = Cli::try_parse_from(["roombook", "create", "--user", "1", "--room", "2"]);
        assert!(result.is_err());
    }
}
