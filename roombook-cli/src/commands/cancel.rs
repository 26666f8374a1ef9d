//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{open_manager, parse_id, GlobalOptions};
use clap::Args;

/// Cancel a pending reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_id(self.id)?;

        let mut manager = open_manager(global)?;
        let cancelled = manager.cancel(id)?;

        if !global.quiet {
            eprintln!("Cancelled reservation {}", cancelled.id());
        }

        Ok(())
    }
}
