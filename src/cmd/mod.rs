// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config: options, inis
//!   mods:   list, query, order      (scan installed mods)
//!   file:   export, show, detect, convert
//! ```
//!
//! Handlers print to stdout; diagnostics go through `tracing`.

pub mod config;
pub mod file;
pub mod mods;
