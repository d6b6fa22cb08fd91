// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List file commands: export, show, detect, convert.

use std::collections::BTreeSet;

use tracing::warn;

use crate::cli::file::{ConvertArgs, DetectArgs, ExportArgs, ShowArgs};
use crate::cmd::mods::{activation_order, installed_mods, render_records};
use crate::config::Config;
use crate::error::Result;
use crate::list::{FormatRegistry, FormatVersion};
use crate::model::{ModCollection, ModRecord};
use crate::store::{FsListStore, ListOptions, ListStore, export_list, import_list};

/// Reorders `mods` to follow `order`.
///
/// Records missing from `order` (flagged `ignored`, stubs) keep their
/// collection order after the ordered ones.
#[must_use]
pub fn arrange(mods: &ModCollection, order: &[String]) -> ModCollection {
    let mut arranged: ModCollection = order
        .iter()
        .filter_map(|id| mods.find(id))
        .cloned()
        .collect();

    let placed: BTreeSet<&str> = order.iter().map(String::as_str).collect();
    let rest: Vec<ModRecord> = mods
        .iter()
        .filter(|m| !placed.contains(m.package_id.as_str()))
        .cloned()
        .collect();
    if !rest.is_empty() {
        warn!(
            count = rest.len(),
            "Mods outside the activation order are appended at the end"
        );
        arranged.extend(rest);
    }

    match mods.name() {
        Some(name) => arranged.with_name(name),
        None => arranged,
    }
}

fn warn_if_lossy(mods: &ModCollection, version: FormatVersion) {
    if !version.is_lossless() {
        let without_steam_id = mods.iter().filter(|m| m.steam_id.is_none()).count();
        warn!(
            format = %version,
            without_steam_id,
            "This format only keeps Steam ids; package ids are lost"
        );
    } else if mods.iter().any(|m| m.is_stub()) {
        warn!(
            format = %version,
            "Records without a package id cannot be read back from this format"
        );
    }
}

/// Main handler for the export command.
///
/// # Errors
///
/// Returns an error if the mods cannot be scanned or ordered, or the file
/// cannot be written.
pub fn run_export_command(args: &ExportArgs, config: &Config) -> Result<()> {
    let mut mods = installed_mods(config)?;
    if args.ordered {
        let order = activation_order(&mods, &config.order.ignore)?;
        mods = arrange(&mods, &order);
    }

    let version = args.format.unwrap_or(config.list.format);
    warn_if_lossy(&mods, version);
    export_list(&FsListStore, &args.file, &mods, version)?;

    println!("Exported {} mods to {}", mods.len(), args.file.display());
    Ok(())
}

/// Main handler for the show command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its format is not
/// recognized.
pub fn run_show_command(args: &ShowArgs, config: &Config) -> Result<()> {
    let options = ListOptions::builder()
        .with_fallback_to_oldest(config.list.fallback_to_oldest)
        .maybe_with_format(args.format)
        .build();
    let decoded = import_list(&FsListStore, &args.file, &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(decoded.collection.as_slice())?);
        return Ok(());
    }

    println!("# {} ({} mods)", decoded.version, decoded.collection.len());
    for line in render_records(&decoded.collection) {
        println!("{line}");
    }
    for diagnostic in &decoded.diagnostics {
        warn!("{diagnostic}");
    }
    Ok(())
}

/// Main handler for the detect command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its format is not
/// recognized.
pub fn run_detect_command(args: &DetectArgs) -> Result<()> {
    let text = FsListStore.read_text(&args.file)?;
    println!("{}", FormatRegistry::detect(&text)?);
    Ok(())
}

/// Main handler for the convert command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or recognized, or the output
/// cannot be written.
pub fn run_convert_command(args: &ConvertArgs, config: &Config) -> Result<()> {
    let decoded = import_list(&FsListStore, &args.input, &config.list_options())?;
    let version = args.format.unwrap_or(config.list.format);

    warn_if_lossy(&decoded.collection, version);
    export_list(&FsListStore, &args.output, &decoded.collection, version)?;

    println!(
        "Converted {} mods from {} to {}",
        decoded.collection.len(),
        decoded.version,
        version
    );
    Ok(())
}
