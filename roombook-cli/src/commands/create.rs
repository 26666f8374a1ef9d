//! Create command implementation.

use crate::error::CliError;
use crate::utils::{open_manager, parse_date, GlobalOptions};
use clap::Args;
use roombook::ReservationDraft;

/// Create a pending reservation.
#[derive(Args)]
pub struct CreateCommand {
    /// User making the reservation
    #[arg(long, value_name = "USER_ID")]
    pub user: i64,

    /// Room to reserve
    #[arg(long, value_name = "ROOM_ID")]
    pub room: i64,

    /// First day of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: String,

    /// Day the stay ends, exclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: String,
}

impl CreateCommand {
    /// Execute the create command.
    ///
    /// Prints the id of the new reservation on stdout.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let start = parse_date(&self.start, "start")?;
        let end = parse_date(&self.end, "end")?;

        let mut manager = open_manager(global)?;
        let created = manager.create(&ReservationDraft::new(self.user, self.room, start, end))?;

        println!("{}", created.id());
        if global.verbose {
            eprintln!(
                "Created reservation {} for room {} ({})",
                created.id(),
                created.room_id(),
                created.range()
            );
        }

        Ok(())
    }
}
