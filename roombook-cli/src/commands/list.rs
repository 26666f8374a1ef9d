//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations
//! in various formats (table, JSON, CSV, TSV). Without `--all` it runs a
//! paged search; page size defaults come from configuration.

use crate::error::CliError;
use crate::output::write_reservations;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use roombook::config::OutputFormat;
use roombook::{ReservationManager, SearchFilter};

/// List or search reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format (defaults to the configured `output_format`)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Only reservations for this room
    #[arg(long, value_name = "ROOM_ID")]
    pub room: Option<i64>,

    /// Only reservations by this user
    #[arg(long, value_name = "USER_ID")]
    pub user: Option<i64>,

    /// Zero-based page number
    #[arg(long, value_name = "N", conflicts_with = "all")]
    pub page: Option<u32>,

    /// Results per page
    #[arg(long, value_name = "N", conflicts_with = "all")]
    pub page_size: Option<u32>,

    /// List every reservation without paging
    #[arg(long)]
    pub all: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;

        // 2. Open database
        let db = open_database(global, &config)?;
        let manager = ReservationManager::new(db).with_search_defaults(config.search_defaults());

        // 3. Query reservations
        let reservations = if self.all {
            let filter = self.filter();
            let mut all = manager.list()?;
            all.retain(|r| filter.matches(r));
            all
        } else {
            manager.search(&self.filter())?
        };

        // 4. Format and output to stdout
        write_reservations(self.format.unwrap_or(config.output_format()), &reservations)
    }

    fn filter(&self) -> SearchFilter {
        SearchFilter {
            room_id: self.room,
            user_id: self.user,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
