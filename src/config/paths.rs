// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! game/                       RimWorld install
//!   Mods/                     (mods, default game/Mods)
//! steam/steamapps/workshop/
//!   content/294100/           (workshop)
//! ```
//!
//! Relative `mods` paths resolve against `game` when it is set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Directory holding locally installed mods inside a game install.
pub const GAME_MODS_DIR: &str = "Mods";

/// Mod directories configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// RimWorld installation directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<PathBuf>,
    /// Locally installed mods (default: game/Mods).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mods: Option<PathBuf>,
    /// Steam Workshop content directory for app 294100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop: Option<PathBuf>,
}

impl PathsConfig {
    /// Fills in `mods` from `game`.
    pub fn resolve(&mut self) {
        let Some(game) = &self.game else {
            return;
        };
        match &self.mods {
            Some(mods) if mods.is_relative() => self.mods = Some(game.join(mods)),
            None => self.mods = Some(game.join(GAME_MODS_DIR)),
            _ => {}
        }
    }

    /// Returns the mods directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if neither `mods` nor `game` is set.
    pub fn mods(&self) -> Result<&Path> {
        self.mods.as_deref().ok_or_else(|| {
            ConfigError::MissingKey {
                section: "paths".to_string(),
                key: "mods".to_string(),
            }
            .into()
        })
    }

    /// Directories to scan, each with the `workshop_managed` value its mods get.
    #[must_use]
    pub fn scan_roots(&self) -> Vec<(&Path, bool)> {
        self.mods
            .as_deref()
            .map(|p| (p, false))
            .into_iter()
            .chain(self.workshop.as_deref().map(|p| (p, true)))
            .collect()
    }
}
