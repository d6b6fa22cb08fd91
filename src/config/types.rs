// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! Config: GlobalConfig, PathsConfig, OrderConfig, ListConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::list::FormatVersion;
use crate::logging::LogLevel;
use crate::order::IgnoreSet;
use crate::scan::DEFAULT_SCAN_THREADS;

/// Framework mods that patch the game at startup and load first regardless of
/// declared ordering.
pub const DEFAULT_IGNORED_MODS: [&str; 2] = ["brrainz.harmony", "UnlimitedHugs.HugsLib"];

/// Global configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
        }
    }
}

/// Load order options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrderConfig {
    /// Package ids excluded from the dependency graph and activated first.
    pub ignore: IgnoreSet,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            ignore: DEFAULT_IGNORED_MODS.into_iter().collect(),
        }
    }
}

/// Mod list and scanning options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
    /// Format used by `export` and `convert` when none is given.
    pub format: FormatVersion,
    /// Parse undetectable lists as the oldest format.
    pub fallback_to_oldest: bool,
    /// Worker threads for the mods folder scan.
    pub scan_threads: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            format: FormatVersion::default(),
            fallback_to_oldest: false,
            scan_threads: DEFAULT_SCAN_THREADS,
        }
    }
}
