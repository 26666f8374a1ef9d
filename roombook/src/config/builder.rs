//! Configuration builder.
//!
//! Assembles the effective configuration from defaults, the user file,
//! environment variables and programmatic overrides, then validates it.

use std::path::PathBuf;

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::database::resolve_data_dir;
use crate::error::Result;

/// Builder for the effective [`Config`].
///
/// # Examples
///
/// ```
/// use roombook::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { default_page_size: Some(3), ..Default::default() })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.default_page_size, Some(3));
/// assert_eq!(config.max_page_size, Some(100));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the user configuration from this data directory instead of the
    /// resolved default.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Skips configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skips `ROOMBOOK_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies programmatic overrides with the highest precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the user configuration cannot be read or parsed,
    /// an environment variable is malformed, or the merged configuration is
    /// invalid.
    pub fn build(self) -> Result<Config> {
        let mut sources = Vec::new();
        if !self.skip_files {
            let data_dir = resolve_data_dir(self.data_dir.as_deref())?;
            if let Some(source) = ConfigLoader::load_user_config(&data_dir)? {
                log::debug!("Loaded configuration from {}", source.path.display());
                sources.push(source);
            }
        }

        let mut config = Config::defaults();
        ConfigMerger::merge_into(&mut config, &ConfigMerger::merge(sources));

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
