// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Logging infrastructure using the `tracing` ecosystem.
//!
//! ```text
//! init_logging(&LogConfig)
//!        |
//!        v
//!    registry
//!    |       |
//!    v       v
//! Console   File (optional)
//! stderr    non_blocking, no ANSI
//! EnvFilter EnvFilter
//!        |
//!        v
//!    LogGuard (flush on drop)
//!
//! LogLevel:  0=OFF  1=ERROR  2=WARN  3=INFO
//!            4=DEBUG  5=TRACE  6=DUMP (dependencies too)
//! ```
//!
//! Levels 4 and 5 only raise the verbosity of this crate; level 6 also lets
//! the walker and config crates through.

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::Path;

use anyhow::Context;
use bon::Builder;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{ConfigError, Result};

/// Log level (0-6) used on the command line and in `[global]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogLevel(u8);

impl Default for LogLevel {
    fn default() -> Self {
        Self::INFO
    }
}

impl LogLevel {
    pub const SILENT: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const WARN: Self = Self(2);
    pub const INFO: Self = Self(3);
    pub const DEBUG: Self = Self(4);
    pub const TRACE: Self = Self(5);
    pub const DUMP: Self = Self(6);

    /// Creates a level from 0-6.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if the level is greater than 6.
    pub fn new(level: u8) -> std::result::Result<Self, ConfigError> {
        Self::from_u8(level).ok_or_else(|| ConfigError::InvalidValue {
            section: "global".to_string(),
            key: "log_level".to_string(),
            message: format!("log level must be 0-6, got {level}"),
        })
    }

    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Converts from an integer, saturating at [`LogLevel::DUMP`].
    #[must_use]
    pub const fn from_int(level: i32) -> Self {
        match level {
            i32::MIN..=0 => Self::SILENT,
            1 => Self::ERROR,
            2 => Self::WARN,
            3 => Self::INFO,
            4 => Self::DEBUG,
            5 => Self::TRACE,
            _ => Self::DUMP,
        }
    }

    /// Converts from u8, returning None if out of range.
    #[must_use]
    pub const fn from_u8(level: u8) -> Option<Self> {
        if level <= 6 { Some(Self(level)) } else { None }
    }

    /// `EnvFilter` directives for this level.
    #[must_use]
    pub fn to_filter_string(self) -> String {
        let crate_level = match self.0 {
            0 => return "off".to_string(),
            1 => "error",
            2 => "warn",
            3 => "info",
            4 => "debug",
            5 => "trace",
            _ => return "trace".to_string(),
        };
        if self.0 <= 2 {
            crate_level.to_string()
        } else {
            format!("warn,{}={crate_level}", env!("CARGO_CRATE_NAME"))
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.0 {
            0 => "silent",
            1 => "error",
            2 => "warn",
            3 => "info",
            4 => "debug",
            5 => "trace",
            _ => "dump",
        };
        write!(f, "{} ({name})", self.0)
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default = LogLevel::INFO)]
    console_level: LogLevel,
    #[builder(setters(name = with_file_level), default = LogLevel::DEBUG)]
    file_level: LogLevel,
    #[builder(setters(name = with_log_file))]
    log_file: Option<String>,
    #[builder(setters(name = with_show_target), default = false)]
    show_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    #[must_use]
    pub const fn file_level(&self) -> LogLevel {
        self.file_level
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    /// Whether the module path is printed on the console.
    #[must_use]
    pub const fn show_target(&self) -> bool {
        self.show_target
    }
}

/// Keeps the file writer alive; pending lines are flushed on drop.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber.
///
/// Console output goes to stderr so that list and order output on stdout can
/// be piped.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be created.
///
/// # Example
///
/// ```no_run
/// use rmm_rs::logging::{init_logging, LogConfig, LogLevel};
///
/// let config = LogConfig::builder()
///     .with_console_level(LogLevel::WARN)
///     .with_log_file("rmm.log".to_string())
///     .build();
///
/// let _guard = init_logging(&config)?;
/// tracing::info!("Logging initialized");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let console_layer = tfmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_target())
        .with_level(true)
        .with_ansi(true)
        .with_filter(EnvFilter::new(config.console_level().to_filter_string()));

    let (file_layer, file_guard) = if let Some(log_path) = config.log_file() {
        let log_path = Path::new(log_path);

        if let Some(parent) = log_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory {}", parent.display()))?;
        }

        let file = std::fs::File::create(log_path)
            .with_context(|| format!("failed to create log file {}", log_path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);

        let layer = tfmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_level(true)
            .with_ansi(false)
            .with_filter(EnvFilter::new(config.file_level().to_filter_string()));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("a global subscriber is already installed")?;

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}
