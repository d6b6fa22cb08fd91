// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for rmm-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! rmm [global options] <command>
//! version | options | inis
//! list [--json]                     installed mods
//! query <term>...                   search installed mods
//! order [--numbered]                activation order of installed mods
//! export <file> [-f v1|v2|v3]       installed mods --> list file
//! show <file> [-f ..] [--json]      list file --> stdout
//! detect <file>                     print the list format version
//! convert <in> <out> [-f ..]        list file --> list file
//! ```

pub mod file;
pub mod global;
pub mod mods;

#[cfg(test)]
mod tests;

use crate::cli::file::{ConvertArgs, DetectArgs, ExportArgs, ShowArgs};
use crate::cli::global::GlobalOptions;
use crate::cli::mods::{ListArgs, OrderArgs, QueryArgs};
use clap::{Parser, Subcommand};

/// RimWorld Mod Manager
///
/// Lists installed mods, resolves their load order and reads and writes mod
/// lists in every historical list format.
#[derive(Debug, Parser)]
#[command(
    name = "rmm",
    author,
    version,
    about = "RimWorld Mod Manager",
    long_about = "rmm-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Lists installed RimWorld mods, resolves their load order and\n\
                  reads and writes mod lists.\n\n\
                  Point rmm at the game with `rmm -p /path/to/RimWorld list`, or\n\
                  set `paths.game` in rmm.toml. See `rmm <command> --help` for\n\
                  more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  rmm loads `rmm.toml` from the current directory if present.\n\
                  Additional files can be given with --ini; they are loaded in\n\
                  order and override earlier ones. RMM_<SECTION>__<KEY>\n\
                  environment variables override files. Use --no-default-inis\n\
                  to skip rmm.toml."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used by rmm.
    Inis,

    /// Lists installed mods.
    List(ListArgs),

    /// Searches installed mods by name, author, package id or Steam id.
    Query(QueryArgs),

    /// Prints the activation order of installed mods.
    Order(OrderArgs),

    /// Saves the installed mods to a list file.
    Export(ExportArgs),

    /// Prints the mods in a list file.
    Show(ShowArgs),

    /// Prints the format version of a list file.
    Detect(DetectArgs),

    /// Rewrites a list file in another format.
    Convert(ConvertArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
