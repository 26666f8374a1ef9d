//! `roombook`: manage room reservations from the command line.

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use clap::Parser;
use cli::{Cli, Command};
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // Fails only when a logger is already installed
    let _ = roombook::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    let outcome = match cli.command {
        Command::Init(cmd) => cmd.execute(&global),
        Command::Create(cmd) => cmd.execute(&global),
        Command::Get(cmd) => cmd.execute(&global),
        Command::List(cmd) => cmd.execute(&global),
        Command::Update(cmd) => cmd.execute(&global),
        Command::Cancel(cmd) => cmd.execute(&global),
        Command::Delete(cmd) => cmd.execute(&global),
        Command::Approve(cmd) => cmd.execute(&global),
        Command::CheckAvailability(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    if let Err(err) = outcome {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}
