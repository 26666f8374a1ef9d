//! Data directory initialization.
//!
//! This module provides functionality for explicitly initializing the
//! roombook data directory and database, with optional creation of a
//! commented configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::config::{DatabaseConfig, CONFIG_FILE_NAME, DATABASE_FILE_NAME};
use super::connection::Database;

/// Options for data directory initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Overwrite existing database if it exists.
    pub overwrite: bool,
    /// Create a default configuration file.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates new initialization options.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether to overwrite existing database.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to create default configuration file.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// Result of initialization operation.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether a configuration file was created.
    pub config_created: bool,
    /// Path to the data directory.
    pub data_dir: PathBuf,
    /// Path to the freshly created database.
    pub database_path: PathBuf,
}

/// Default configuration template, every option commented out.
const DEFAULT_CONFIG_TEMPLATE: &str = r"# Roombook configuration file

# Page size used when a search does not specify one (default: 10)
# default_page_size: 10

# Largest page size a search may request (default: 100)
# max_page_size: 100

# Maximum time to wait for the database write lock, in seconds (default: 5)
# maximum_lock_wait_seconds: 5

# Refuse to create the data directory implicitly (default: false)
# disable_autoinit: false

# Output format for list commands: table, json, csv or tsv (default: table)
# output_format: table
";

/// Initializes the roombook data directory and database.
///
/// # Errors
///
/// Returns an error if:
/// - The data directory cannot be created
/// - The database already exists and `overwrite` is false
/// - The database cannot be initialized
/// - The configuration file cannot be written
///
/// # Examples
///
/// ```no_run
/// use roombook::database::{init_data_dir, InitOptions};
///
/// let options = InitOptions::new("/tmp/roombook-test").with_create_config(true);
/// let result = init_data_dir(&options).unwrap();
/// println!("Database at {}", result.database_path.display());
/// ```
pub fn init_data_dir(options: &InitOptions) -> Result<InitResult> {
    let mut data_dir_created = false;
    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        data_dir_created = true;
    }

    let database_path = options.data_dir.join(DATABASE_FILE_NAME);

    if database_path.exists() {
        if !options.overwrite {
            return Err(Error::InvalidArgument {
                field: "database".into(),
                message: format!(
                    "Database already exists at {}. Use --overwrite to replace it.",
                    database_path.display()
                ),
            });
        }
        remove_database_files(&database_path)?;
        log::info!("Removed existing database at {}", database_path.display());
    }

    Database::open(DatabaseConfig::new(&database_path))?;

    let mut config_created = false;
    if options.create_config {
        let config_path = options.data_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            config_created = true;
        }
    }

    Ok(InitResult {
        data_dir_created,
        config_created,
        data_dir: options.data_dir.clone(),
        database_path,
    })
}

/// Removes the database together with its WAL side files.
fn remove_database_files(database_path: &Path) -> Result<()> {
    fs::remove_file(database_path)?;
    for suffix in ["-wal", "-shm"] {
        let mut side = database_path.as_os_str().to_owned();
        side.push(suffix);
        let side = PathBuf::from(side);
        if side.exists() {
            fs::remove_file(side)?;
        }
    }
    Ok(())
}
