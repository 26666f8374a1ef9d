//! Configuration schema definitions.
//!
//! This module defines the configuration structure for roombook: paging
//! defaults, lock waiting, auto-initialization and output format.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::{SearchDefaults, DEFAULT_PAGE_SIZE};

/// Largest page size a search may request unless configured otherwise.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

/// Default time to wait for the database write lock.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that partial configurations from several
/// sources can be merged.
///
/// # Examples
///
/// ```
/// use roombook::config::{Config, OutputFormat};
///
/// let config = Config {
///     default_page_size: Some(25),
///     output_format: Some(OutputFormat::Json),
///     ..Default::default()
/// };
/// assert_eq!(config.search_defaults().page_size, 25);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Page size used when a search does not specify one.
    pub default_page_size: Option<u32>,

    /// Largest page size a search may request.
    pub max_page_size: Option<u32>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Disable automatic data directory initialization.
    pub disable_autoinit: Option<bool>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Returns the built-in defaults with every field set.
    #[must_use]
    pub const fn defaults() -> Self {
        Self {
            default_page_size: Some(DEFAULT_PAGE_SIZE),
            max_page_size: Some(DEFAULT_MAX_PAGE_SIZE),
            maximum_lock_wait_seconds: Some(DEFAULT_LOCK_WAIT_SECONDS),
            disable_autoinit: Some(false),
            output_format: Some(OutputFormat::Table),
        }
    }

    /// Returns the paging defaults for the reservation manager.
    ///
    /// When only `max_page_size` is set and it is below the built-in page
    /// size, the default page shrinks to the maximum.
    #[must_use]
    pub fn search_defaults(&self) -> SearchDefaults {
        let page_size = match (self.default_page_size, self.max_page_size) {
            (Some(size), _) => size,
            (None, Some(max)) => DEFAULT_PAGE_SIZE.min(max),
            (None, None) => DEFAULT_PAGE_SIZE,
        };
        SearchDefaults {
            page_size,
            max_page_size: self.max_page_size,
        }
    }

    /// Returns how long to wait for the database write lock.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Returns whether implicit data directory creation is disabled.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }

    /// Returns the configured output format, defaulting to a table.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Output format for commands that print reservations.
///
/// # Examples
///
/// ```
/// use roombook::config::OutputFormat;
///
/// let format: OutputFormat = "JSON".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        <Self as clap::ValueEnum>::from_str(s.trim(), true).map_err(|_| Error::InvalidArgument {
            field: "output_format".into(),
            message: format!("unknown output format '{s}' (expected table, json, csv or tsv)"),
        })
    }
}
