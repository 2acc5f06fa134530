//! Command line configuration parsed from environment variables.
//!
//! Every setting can be supplied through a `GHERKBOT_`-prefixed environment
//! variable and overridden by the matching command line flag.

use std::env;
use std::str::FromStr;

use gherkbot::SyncOptions;
use thiserror::Error;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "GHERKBOT_LOG_LEVEL";
/// Environment variable holding the feature file extension.
pub const SOURCE_EXT_VAR: &str = "GHERKBOT_SOURCE_EXT";
/// Environment variable holding the generated script extension.
pub const TARGET_EXT_VAR: &str = "GHERKBOT_TARGET_EXT";

/// Errors raised while building the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting holds a value that cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so per-file progress stays quiet unless requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging.
    Trace,
    /// Planned sync actions and parser details.
    Debug,
    /// One event per written, deleted or skipped file.
    Info,
    /// I/O failures and ignored input.
    #[default]
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for a `gherkbot` invocation.
///
/// # Environment Variables
///
/// - `GHERKBOT_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `GHERKBOT_SOURCE_EXT`: extension of feature files (default `feature`)
/// - `GHERKBOT_TARGET_EXT`: extension of generated scripts (default `robot`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level for the stderr subscriber.
    pub log_level: LogLevel,
    /// Extension matched when scanning source trees.
    pub source_extension: String,
    /// Extension given to generated scripts.
    pub target_extension: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        let options = SyncOptions::default();
        Self {
            log_level: LogLevel::default(),
            source_extension: options.source_extension().to_string(),
            target_extension: options.target_extension().to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] if a variable holds an invalid
    /// value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// missing keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] for an unknown log level or an
    /// empty extension.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(level) = lookup(LOG_LEVEL_VAR) {
            config.log_level = level.parse()?;
        }
        if let Some(ext) = lookup(SOURCE_EXT_VAR) {
            config.source_extension = validate_extension(SOURCE_EXT_VAR, ext)?;
        }
        if let Some(ext) = lookup(TARGET_EXT_VAR) {
            config.target_extension = validate_extension(TARGET_EXT_VAR, ext)?;
        }
        Ok(config)
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// Command line flags take precedence over environment-based values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] when an extension override is
    /// empty once its leading `.` is removed.
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        source_extension: Option<String>,
        target_extension: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(ext) = source_extension {
            self.source_extension = validate_extension("--source-ext", ext)?;
        }
        if let Some(ext) = target_extension {
            self.target_extension = validate_extension("--target-ext", ext)?;
        }
        Ok(self)
    }

    /// Extensions as synchronisation options.
    #[must_use]
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions::new(&self.source_extension, &self.target_extension)
    }
}

fn validate_extension(key: &str, value: String) -> Result<String, ConfigError> {
    if value.trim().trim_start_matches('.').is_empty() {
        return Err(ConfigError::InvalidConfig(format!(
            "{key} must name a file extension, got '{value}'"
        )));
    }
    Ok(value)
}
