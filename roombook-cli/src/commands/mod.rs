//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the data directory and database
//! - `create`: Create a pending reservation
//! - `get`: Show a single reservation
//! - `list`: List or search reservations
//! - `update`: Replace the details of a pending reservation
//! - `cancel`: Cancel a pending reservation
//! - `delete`: Delete a reservation
//! - `approve`: Approve a pending reservation
//! - `check_availability`: Check whether a room is free for a date range
//! - `completions`: Generate shell completion scripts

pub mod approve;
pub mod cancel;
pub mod check_availability;
pub mod completions;
pub mod create;
pub mod delete;
pub mod get;
pub mod init;
pub mod list;
pub mod update;

pub use approve::ApproveCommand;
pub use cancel::CancelCommand;
pub use check_availability::CheckAvailabilityCommand;
pub use completions::CompletionsCommand;
pub use create::CreateCommand;
pub use delete::DeleteCommand;
pub use get::GetCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use update::UpdateCommand;
