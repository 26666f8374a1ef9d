//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, and argument
//! parsing.

use crate::error::CliError;
use chrono::NaiveDate;
use roombook::database::{self, DATABASE_FILE_NAME};
use roombook::{Config, ConfigBuilder, Database, DatabaseConfig, ReservationId, ReservationManager};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Date format accepted on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. `<data_dir>/config.yaml`
/// 3. Built-in defaults (lowest priority)
///
/// Global options are applied on top by the callers that use them.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the data directory from global options.
///
/// Priority: `--data-dir` > `ROOMBOOK_DATA_DIR` > `~/.roombook`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    database::resolve_data_dir(global.data_dir.as_deref())
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the reservation database under the resolved data directory.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database is missing and auto-init is
/// disabled by flag, environment or config.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    // --busy-timeout beats maximum_lock_wait_seconds
    let busy_timeout = global
        .busy_timeout
        .map_or_else(|| config.lock_wait(), |secs| Duration::from_secs(secs.into()));

    let mut db_config = DatabaseConfig::new(db_path).with_busy_timeout(busy_timeout);
    if global.disable_autoinit || config.autoinit_disabled() {
        db_config = db_config.without_auto_create();
    }
    Ok(Database::open(db_config)?)
}

/// Open a reservation manager over the configured database.
///
/// Search paging defaults come from the loaded configuration.
pub fn open_manager(global: &GlobalOptions) -> Result<ReservationManager<Database>, CliError> {
    let config = load_configuration(global)?;
    let db = open_database(global, &config)?;
    Ok(ReservationManager::new(db).with_search_defaults(config.search_defaults()))
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(value: &str, flag: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        CliError::InvalidArguments(format!(
            "--{flag}: '{value}' is not a valid date (expected YYYY-MM-DD): {e}"
        ))
    })
}

/// Convert a raw reservation id argument.
pub fn parse_id(value: i64) -> Result<ReservationId, CliError> {
    ReservationId::try_from(value).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
