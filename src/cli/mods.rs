// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for commands working on installed mods.

use clap::Args;

/// Arguments for the list command.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the query command.
#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Name, author, package id or Steam id; all terms must match
    #[arg(value_name = "TERM", required = true)]
    pub terms: Vec<String>,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the order command.
#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    /// Prefix each line with its position
    #[arg(short = 'n', long)]
    pub numbered: bool,

    /// Additional package ids to treat like the configured ignore set
    #[arg(long = "ignore", value_name = "PACKAGE_ID", action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,
}
