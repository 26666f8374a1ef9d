//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use roombook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::defaults()).unwrap();
///
/// let bad = Config { default_page_size: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a page size or the lock wait is zero, or if the
    /// default page size exceeds the maximum page size.
    pub fn validate(config: &Config) -> Result<()> {
        if config.default_page_size == Some(0) {
            return Err(Error::InvalidArgument {
                field: "default_page_size".into(),
                message: "default page size must be positive".into(),
            });
        }

        if config.max_page_size == Some(0) {
            return Err(Error::InvalidArgument {
                field: "max_page_size".into(),
                message: "maximum page size must be positive".into(),
            });
        }

        if let (Some(default), Some(max)) = (config.default_page_size, config.max_page_size) {
            if default > max {
                return Err(Error::InvalidArgument {
                    field: "default_page_size".into(),
                    message: format!(
                        "default page size {default} exceeds maximum page size {max}"
                    ),
                });
            }
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::InvalidArgument {
                field: "maximum_lock_wait_seconds".into(),
                message: "lock wait must be at least one second".into(),
            });
        }

        Ok(())
    }
}
