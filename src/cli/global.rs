// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE        ← Additional config files (can repeat)
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//! --log-file FILE   ← global.log_file override
//! --path DIR        ← paths.game override
//! --workshop DIR    ← paths.workshop override
//! --set KEY=VAL     ← Direct config override
//!
//! Precedence: CLI flags > --set > env > --ini > rmm.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// RimWorld path; its Mods directory is scanned.
    #[arg(short = 'p', long = "path", value_name = "DIR")]
    pub game: Option<PathBuf>,

    /// Workshop path; mods found here are marked workshop-managed.
    #[arg(short = 'w', long = "workshop", value_name = "DIR")]
    pub workshop: Option<PathBuf>,

    /// Sets an option, such as 'list.format=v2'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Disables auto loading of rmm.toml, only uses --ini.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,
}

impl GlobalOptions {
    /// Converts command-line options to `(key, value)` configuration overrides,
    /// `--set` entries first.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for a `--set` entry without `=`
    /// or with an empty key.
    pub fn to_config_overrides(&self) -> Result<Vec<(String, String)>, ConfigError> {
        let mut overrides = self
            .options
            .iter()
            .map(|option| parse_override(option))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(level) = self.log_level {
            overrides.push(("global.output_log_level".into(), level.to_string()));
        }

        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level".into(), level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file".into(), path.display().to_string()));
        }

        if let Some(ref game) = self.game {
            overrides.push(("paths.game".into(), game.display().to_string()));
        }

        if let Some(ref workshop) = self.workshop {
            overrides.push(("paths.workshop".into(), workshop.display().to_string()));
        }

        Ok(overrides)
    }
}

fn parse_override(option: &str) -> Result<(String, String), ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidValue {
        section: "cli".to_string(),
        key: "set".to_string(),
        message: format!("{message}: '{option}'"),
    };

    let (key, value) = option
        .split_once('=')
        .ok_or_else(|| invalid("expected KEY=VALUE"))?;
    let key = key.trim().replace('/', ".");
    if key.is_empty() {
        return Err(invalid("empty key"));
    }
    Ok((key, value.trim().to_string()))
}
