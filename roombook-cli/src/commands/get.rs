//! Get command implementation.

use crate::error::CliError;
use crate::output::write_reservation;
use crate::utils::{load_configuration, open_database, parse_id, GlobalOptions};
use clap::Args;
use roombook::config::OutputFormat;
use roombook::ReservationManager;

/// Show a single reservation.
#[derive(Args)]
pub struct GetCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Output format (defaults to the configured `output_format`)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_id(self.id)?;

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let reservation = ReservationManager::new(db).get(id)?;

        write_reservation(self.format.unwrap_or(config.output_format()), &reservation)
    }
}
