// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for rmm-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. rmm.toml (cwd, optional)
//! 3. --ini files, in order
//! 4. RMM_* env vars
//! 5. CLI overrides (--path, --workshop, --log-level, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! RMM_LIST__FORMAT=v2                    → list.format = "v2"
//! RMM_PATHS__MODS=/games/RimWorld/Mods   → paths.mods = "/games/RimWorld/Mods"
//! RMM_ORDER__IGNORE=a.mod,b.mod          → order.ignore = ["a.mod", "b.mod"]
//! ```
//!
//! # Example
//!
//! ```toml
//! [paths]
//! game = "/games/RimWorld"
//! workshop = "/home/me/.steam/steamapps/workshop/content/294100"
//!
//! [order]
//! ignore = ["brrainz.harmony", "UnlimitedHugs.HugsLib"]
//!
//! [list]
//! format = "v3"
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::store::ListOptions;

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{GlobalConfig, ListConfig, OrderConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Mod directories.
    pub paths: PathsConfig,
    /// Load order options.
    pub order: OrderConfig,
    /// List format options.
    pub list: ListConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rmm_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("rmm.toml")
    ///     .with_env_prefix("RMM")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve paths and validate values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if `list.scan_threads` is zero.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.paths.resolve();
        if self.list.scan_threads == 0 {
            return Err(ConfigError::InvalidValue {
                section: "list".to_string(),
                key: "scan_threads".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// List reading options derived from `[list]`.
    #[must_use]
    pub fn list_options(&self) -> ListOptions {
        ListOptions::builder()
            .with_fallback_to_oldest(self.list.fallback_to_oldest)
            .build()
    }

    /// Format configuration options for display, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_order_options(&mut options);
        self.format_list_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), display(self.global.log_file.as_ref()));
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("paths.game".into(), display(self.paths.game.as_ref()));
        options.insert("paths.mods".into(), display(self.paths.mods.as_ref()));
        options.insert("paths.workshop".into(), display(self.paths.workshop.as_ref()));
    }

    fn format_order_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "order.ignore".into(),
            self.order.ignore.iter().collect::<Vec<_>>().join(", "),
        );
    }

    fn format_list_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("list.format".into(), self.list.format.to_string());
        options.insert(
            "list.fallback_to_oldest".into(),
            self.list.fallback_to_oldest.to_string(),
        );
        options.insert("list.scan_threads".into(), self.list.scan_threads.to_string());
    }
}

fn display(path: Option<&PathBuf>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}
