// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for commands working on list files.

use clap::Args;
use std::path::PathBuf;

use crate::list::FormatVersion;

/// Arguments for the export command.
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// List file to write
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Format to write (v1, v2, v3); defaults to `list.format`
    #[arg(short = 'f', long, value_name = "VERSION")]
    pub format: Option<FormatVersion>,

    /// Write mods in activation order instead of folder order
    #[arg(long)]
    pub ordered: bool,
}

/// Arguments for the show command.
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// List file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Skip detection and read as this format
    #[arg(short = 'f', long, value_name = "VERSION")]
    pub format: Option<FormatVersion>,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the detect command.
#[derive(Debug, Clone, Args)]
pub struct DetectArgs {
    /// List file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the convert command.
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// List file to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// List file to write
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Format to write; defaults to `list.format`
    #[arg(short = 'f', long, value_name = "VERSION")]
    pub format: Option<FormatVersion>,
}
