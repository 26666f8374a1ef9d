//! Stderr logging behind the `log` facade.
//!
//! Library code only uses the `log` macros. A binary picks a [`LogLevel`]
//! with [`init_logger`] and installs the returned [`Logger`].

use std::env;
use std::fmt;
use std::str::FromStr;

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// Environment variable read by [`init_logger`] when no flag is given.
pub const LOG_MODE_ENV: &str = "ROOMBOOK_LOG_MODE";

/// How much the logger prints, from nothing (`Quiet`) to debug (`Verbose`).
///
/// ```
/// use roombook::LogLevel;
///
/// assert_eq!("Verbose".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Nothing at all.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Everything down to debug.
    Verbose,
}

impl LogLevel {
    const fn name(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        }
    }

    /// The `log` filter matching this level.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Quiet, Self::Normal, Self::Verbose]
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown log mode '{s}' (expected quiet, normal or verbose)"))
    }
}

/// Writes `LEVEL: message` lines to stderr.
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// A logger that lets through what `level` allows.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// The level this logger was created with.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Makes this the process-wide `log` backend.
    ///
    /// # Errors
    ///
    /// Fails if another logger was installed first.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let max = self.level.level_filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max);
        Ok(())
    }

    fn format(record: &Record<'_>) -> String {
        let tag = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug | Level::Trace => "DEBUG",
        };
        format!("{tag}: {}", record.args())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.level_filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", Self::format(record));
        }
    }

    fn flush(&self) {}
}

/// Picks the level from the CLI flags, then `ROOMBOOK_LOG_MODE`, then
/// `Normal`. `verbose` wins over `quiet`; an unparseable mode is ignored.
///
/// ```
/// use roombook::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let level = if verbose {
        LogLevel::Verbose
    } else if quiet {
        LogLevel::Quiet
    } else {
        env::var(LOG_MODE_ENV)
            .ok()
            .and_then(|mode| mode.parse().ok())
            .unwrap_or(LogLevel::Normal)
    };
    Logger::new(level)
}
