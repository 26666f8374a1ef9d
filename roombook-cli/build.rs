//! Renders `roombook.1` into `OUT_DIR/man` with clap_mangen.
//!
//! A build script cannot link against the crate it builds, so the command
//! tree is described again here. Keep it in line with src/cli.rs.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::path::PathBuf;
use std::{env, fs, io};

const SUBCOMMANDS: &[(&str, &str)] = &[
    ("init", "Create the data directory and reservation database"),
    ("create", "Create a PENDING reservation and print its id"),
    ("get", "Show one reservation by id"),
    ("list", "List reservations, optionally filtered by room or user and paged"),
    ("update", "Replace the user, room or dates of a PENDING reservation"),
    ("cancel", "Move a PENDING reservation to CANCELLED"),
    ("delete", "Remove a reservation whatever its status"),
    (
        "approve",
        "Move a PENDING reservation to APPROVED unless an approved reservation for the same room overlaps it",
    ),
    ("check-availability", "Report AVAILABLE or RESERVED for a room and date range"),
    ("completions", "Print a shell completion script"),
];

fn flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .global(true)
        .action(ArgAction::SetTrue)
}

fn man_page_command() -> Command {
    Command::new("roombook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage room reservations")
        .long_about("Create, approve and cancel room reservations without double-booking a room")
        .arg(flag("verbose", "Log debug output to stderr"))
        .arg(flag("quiet", "Only print errors and requested data"))
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("PATH")
                .help("Directory holding roombook.db and config.yaml")
                .global(true)
                .env("ROOMBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .value_name("SECONDS")
                .help("How long to wait for the database write lock")
                .global(true)
                .env("ROOMBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            flag("disable-autoinit", "Fail instead of creating a missing database")
                .env("ROOMBOOK_DISABLE_AUTOINIT"),
        )
        .subcommands(
            SUBCOMMANDS
                .iter()
                .map(|(name, about)| Command::new(*name).about(*about)),
        )
}

fn main() -> io::Result<()> {
    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::other("OUT_DIR is not set"))?;
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut page = Vec::new();
    Man::new(man_page_command()).render(&mut page)?;
    fs::write(man_dir.join("roombook.1"), page)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    Ok(())
}
