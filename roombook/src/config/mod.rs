//! Layered settings for roombook.
//!
//! Each layer overrides the one before it:
//!
//! 1. built-in defaults
//! 2. `<data_dir>/config.yaml`
//! 3. `ROOMBOOK_*` environment variables
//! 4. values passed to [`ConfigBuilder::with_config`]
//!
//! The merged result is validated once, after the last layer.
//!
//! ```no_run
//! use roombook::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("page size: {}", config.search_defaults().page_size);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, DEFAULT_LOCK_WAIT_SECONDS, DEFAULT_MAX_PAGE_SIZE};
pub use validator::ConfigValidator;
