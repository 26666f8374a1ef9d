//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `ROOMBOOK_*` environment variables that
//! override configuration file values.

use std::env;
use std::str::FromStr;

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use roombook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("ROOMBOOK_DEFAULT_PAGE_SIZE") {
            config.default_page_size = Some(Self::parse_number("ROOMBOOK_DEFAULT_PAGE_SIZE", &val)?);
        }

        if let Ok(val) = env::var("ROOMBOOK_MAX_PAGE_SIZE") {
            config.max_page_size = Some(Self::parse_number("ROOMBOOK_MAX_PAGE_SIZE", &val)?);
        }

        if let Ok(val) = env::var("ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number("ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS", &val)?);
        }

        if let Ok(val) = env::var("ROOMBOOK_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("ROOMBOOK_DISABLE_AUTOINIT", &val)?);
        }

        if let Ok(val) = env::var("ROOMBOOK_OUTPUT_FORMAT") {
            let format = val.parse::<OutputFormat>().map_err(|_| Error::InvalidArgument {
                field: "ROOMBOOK_OUTPUT_FORMAT".into(),
                message: format!("Invalid output format: '{val}' (expected table/json/csv/tsv)"),
            })?;
            config.output_format = Some(format);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::InvalidArgument {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::InvalidArgument {
            field: field.into(),
            message: format!("Invalid number: '{s}'"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "ROOMBOOK_DEFAULT_PAGE_SIZE",
        "ROOMBOOK_MAX_PAGE_SIZE",
        "ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
        "ROOMBOOK_DISABLE_AUTOINIT",
        "ROOMBOOK_OUTPUT_FORMAT",
    ];

    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let saved: Vec<_> = VARS.iter().map(|k| (*k, env::var(k).ok())).collect();
        for key in VARS {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }

        f();

        for (key, value) in saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }

    #[test]
    fn test_parse_bool() {
        assert!(EnvironmentConfig::parse_bool("X", "TRUE").unwrap());
        assert!(EnvironmentConfig::parse_bool("X", "on").unwrap());
        assert!(!EnvironmentConfig::parse_bool("X", "0").unwrap());
        assert!(!EnvironmentConfig::parse_bool("X", "No").unwrap());
        assert!(EnvironmentConfig::parse_bool("X", "maybe").is_err());
    }

    #[test]
    #[serial]
    fn test_no_variables_leaves_config_untouched() {
        with_env(&[], || {
            let mut config = Config::defaults();
            EnvironmentConfig::apply_overrides(&mut config).unwrap();
            assert_eq!(config, Config::defaults());
        });
    }

    #[test]
    #[serial]
    fn test_all_variables_applied() {
        with_env(
            &[
                ("ROOMBOOK_DEFAULT_PAGE_SIZE", "15"),
                ("ROOMBOOK_MAX_PAGE_SIZE", "60"),
                ("ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS", "9"),
                ("ROOMBOOK_DISABLE_AUTOINIT", "yes"),
                ("ROOMBOOK_OUTPUT_FORMAT", "json"),
            ],
            || {
                let mut config = Config::default();
                EnvironmentConfig::apply_overrides(&mut config).unwrap();
                assert_eq!(config.default_page_size, Some(15));
                assert_eq!(config.max_page_size, Some(60));
                assert_eq!(config.maximum_lock_wait_seconds, Some(9));
                assert_eq!(config.disable_autoinit, Some(true));
                assert_eq!(config.output_format, Some(OutputFormat::Json));
            },
        );
    }

    #[test]
    #[serial]
    fn test_invalid_number_names_variable() {
        with_env(&[("ROOMBOOK_MAX_PAGE_SIZE", "lots")], || {
            let mut config = Config::default();
            let err = EnvironmentConfig::apply_overrides(&mut config).unwrap_err();
            assert!(
                matches!(err, Error::InvalidArgument { ref field, .. } if field == "ROOMBOOK_MAX_PAGE_SIZE")
            );
        });
    }

    #[test]
    #[serial]
    fn test_invalid_output_format() {
        with_env(&[("ROOMBOOK_OUTPUT_FORMAT", "yaml")], || {
            let mut config = Config::default();
            assert!(EnvironmentConfig::apply_overrides(&mut config).is_err());
        });
    }
}
