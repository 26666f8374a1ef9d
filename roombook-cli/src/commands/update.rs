//! Update command implementation.

use crate::error::CliError;
use crate::utils::{open_manager, parse_date, parse_id, GlobalOptions};
use clap::Args;
use roombook::ReservationDraft;

/// Replace the details of a pending reservation.
#[derive(Args)]
pub struct UpdateCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

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

impl UpdateCommand {
    /// Execute the update command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_id(self.id)?;
        let start = parse_date(&self.start, "start")?;
        let end = parse_date(&self.end, "end")?;

        let mut manager = open_manager(global)?;
        let updated = manager.update(id, &ReservationDraft::new(self.user, self.room, start, end))?;

        if !global.quiet {
            eprintln!(
                "Updated reservation {}: room {} ({})",
                updated.id(),
                updated.room_id(),
                updated.range()
            );
        }

        Ok(())
    }
}
