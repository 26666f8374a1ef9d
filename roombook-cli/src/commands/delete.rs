//! Delete command implementation.

use crate::error::CliError;
use crate::utils::{open_manager, parse_id, GlobalOptions};
use clap::Args;

/// Delete a reservation, whatever its status.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_id(self.id)?;

        let mut manager = open_manager(global)?;
        manager.delete(id)?;

        if !global.quiet {
            eprintln!("Deleted reservation {id}");
        }

        Ok(())
    }
}
