// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file(req)
//!   .add_toml_file_optional(opt)
//!   .add_toml_str()
//!   .with_env_prefix("RMM")     RMM_<SECTION>__<KEY>
//!   .set()
//!        |
//!        v
//!    build() --> Config (resolved, validated)
//! ```

use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};

use super::Config;
use crate::error::Result;

/// Keys whose textual values are comma-separated lists.
const LIST_KEYS: [&str; 1] = ["order.ignore"];

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<(String, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML file that must exist when `build()` is called.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("file".to_string(), p.to_path_buf()));
        self
    }

    /// Adds a TOML file that is skipped when missing.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(("optional".to_string(), p.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` environment variables.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or if the value cannot be converted
    /// to a configuration value.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        Ok(self)
    }

    /// Sets an override from its textual form, as given on the command line.
    ///
    /// List keys such as `order.ignore` take comma-separated values.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid.
    pub fn set_str(self, key: &str, value: &str) -> Result<Self> {
        if LIST_KEYS.contains(&key) {
            let items: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect();
            self.set(key, items)
        } else {
            self.set(key, value)
        }
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid TOML syntax.
    /// - The merged configuration cannot be deserialized into `Config`.
    /// - A value fails validation.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => {
                let env = LIST_KEYS.iter().fold(
                    Environment::with_prefix(prefix)
                        .prefix_separator("_")
                        .separator("__")
                        .list_separator(",")
                        .try_parsing(true),
                    |env, key| env.with_list_parse_key(key),
                );
                self.builder.add_source(env)
            }
            None => self.builder,
        };
        let cfg = builder.build()?;
        let mut config: Config = cfg.try_deserialize()?;
        config.resolve_and_validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn loaded_files(&self) -> Vec<(String, PathBuf)> {
        self.files.clone()
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
