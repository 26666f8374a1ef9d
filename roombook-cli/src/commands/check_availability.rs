//! Check-availability command implementation.
//!
//! Prints `AVAILABLE` or `RESERVED` followed by a message. With
//! `--fail-if-reserved` the command exits 1 when the room is taken, which
//! makes it usable as a shell guard.

use crate::error::CliError;
use crate::output::write_availability;
use crate::utils::{load_configuration, open_database, parse_date, GlobalOptions};
use clap::Args;
use roombook::config::OutputFormat;
use roombook::{DateRange, ReservationManager};

/// Check whether a room is free for a date range.
#[derive(Args)]
pub struct CheckAvailabilityCommand {
    /// Room to check
    #[arg(long, value_name = "ROOM_ID")]
    pub room: i64,

    /// First day of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: String,

    /// Day the stay ends, exclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: String,

    /// Output format (defaults to the configured `output_format`)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Exit with status 1 if the room is reserved
    #[arg(long)]
    pub fail_if_reserved: bool,
}

impl CheckAvailabilityCommand {
    /// Execute the check-availability command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let start = parse_date(&self.start, "start")?;
        let end = parse_date(&self.end, "end")?;
        let range = DateRange::new(start, end).map_err(roombook::Error::from)?;

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let availability = ReservationManager::new(db).check_availability(self.room, &range)?;

        write_availability(self.format.unwrap_or(config.output_format()), &availability)?;

        if self.fail_if_reserved && !availability.is_available() {
            return Err(CliError::SemanticFailure(availability.message()));
        }

        Ok(())
    }
}
