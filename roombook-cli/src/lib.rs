//! The roombook command tree, exposed for tooling that inspects it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod utils;

pub use cli::Cli;
