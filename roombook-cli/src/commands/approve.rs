//! Approve command implementation.

use crate::error::CliError;
use crate::utils::{open_manager, parse_id, GlobalOptions};
use clap::Args;

/// Approve a pending reservation.
///
/// Approval is refused when the reservation overlaps an approved
/// reservation for the same room.
#[derive(Args)]
pub struct ApproveCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,
}

impl ApproveCommand {
    /// Execute the approve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_id(self.id)?;

        let mut manager = open_manager(global)?;
        let approved = manager.approve(id)?;

        if !global.quiet {
            eprintln!(
                "Approved reservation {} for room {} ({})",
                approved.id(),
                approved.room_id(),
                approved.range()
            );
        }

        Ok(())
    }
}
