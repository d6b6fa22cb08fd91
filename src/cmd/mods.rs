// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Installed mod commands: list, query, order.

use tracing::warn;

use crate::cli::mods::{ListArgs, OrderArgs, QueryArgs};
use crate::config::Config;
use crate::error::{ConfigError, Result, RmmError};
use crate::model::{ModCollection, ModRecord};
use crate::order::IgnoreSet;
use crate::scan::{FolderScanner, RecordSupplier, ScanOptions};

/// Scans every configured mods directory.
///
/// Local mods come first, then workshop mods.
///
/// # Errors
///
/// Returns an error if no mods directory is configured or one of them cannot
/// be scanned.
pub fn installed_mods(config: &Config) -> Result<ModCollection> {
    let roots = config.paths.scan_roots();
    if roots.is_empty() {
        return Err(ConfigError::MissingKey {
            section: "paths".to_string(),
            key: "mods".to_string(),
        }
        .into());
    }

    let mut mods = ModCollection::named("installed");
    for (root, workshop_managed) in roots {
        let options = ScanOptions::builder()
            .with_threads(config.list.scan_threads)
            .with_workshop_managed(workshop_managed)
            .build();
        mods.extend(FolderScanner::new(root, options).supply()?);
    }

    for id in mods.duplicate_ids() {
        warn!(package_id = %id, "Mod is installed more than once");
    }
    Ok(mods)
}

/// One line per record: id, Steam id, title and flags.
#[must_use]
pub fn render_records(mods: &ModCollection) -> Vec<String> {
    let width = mods
        .iter()
        .map(|m| m.to_string().len())
        .max()
        .unwrap_or(0);

    mods.iter()
        .map(|m| {
            let steam = m.steam_id.map_or_else(|| "-".to_string(), |id| id.to_string());
            let line = format!("{:<width$}  {steam:>10}  {}", m.to_string(), title(m));
            line.trim_end().to_string()
        })
        .collect()
}

fn title(record: &ModRecord) -> String {
    let mut title = match (&record.name, &record.author) {
        (Some(name), Some(author)) => format!("{name} by {author}"),
        (Some(name), None) => name.clone(),
        (None, Some(author)) => format!("by {author}"),
        (None, None) => String::new(),
    };
    if record.ignored {
        title.push_str(" [ignored]");
    }
    if record.workshop_managed == Some(true) {
        title.push_str(" [workshop]");
    }
    title
}

fn print_records(mods: &ModCollection, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(mods.as_slice())?);
    } else if mods.is_empty() {
        println!("No mods found");
    } else {
        for line in render_records(mods) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Main handler for the list command.
///
/// # Errors
///
/// Returns an error if the mods directories cannot be scanned.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    print_records(&installed_mods(config)?, args.json)
}

/// Main handler for the query command.
///
/// # Errors
///
/// Returns an error if the mods directories cannot be scanned.
pub fn run_query_command(args: &QueryArgs, config: &Config) -> Result<()> {
    let found = installed_mods(config)?.query(&args.terms);
    print_records(&found, args.json)
}

/// Activation order of `mods`, warning about installed incompatibilities.
///
/// # Errors
///
/// Returns an error if the declared relations are cyclic.
pub fn activation_order(mods: &ModCollection, ignore: &IgnoreSet) -> Result<Vec<String>> {
    for pair in mods.dependency_graph(ignore).incompatibilities() {
        warn!(
            package_id = %pair.mod_id,
            other = %pair.other_id,
            "Incompatible mods are both installed"
        );
    }
    mods.activation_order(ignore)
        .map_err(|cycle| RmmError::from(cycle).into())
}

/// Formats an activation order for printing.
#[must_use]
pub fn render_order(order: &[String], numbered: bool) -> Vec<String> {
    if !numbered {
        return order.to_vec();
    }
    let width = order.len().to_string().len();
    order
        .iter()
        .enumerate()
        .map(|(i, id)| format!("{:>width$}. {id}", i + 1))
        .collect()
}

/// Main handler for the order command.
///
/// # Errors
///
/// Returns an error if the mods directories cannot be scanned or the load
/// order contains a cycle.
pub fn run_order_command(args: &OrderArgs, config: &Config) -> Result<()> {
    let mods = installed_mods(config)?;

    let mut ignore = config.order.ignore.clone();
    for id in &args.ignore {
        ignore.insert(id.clone());
    }

    for line in render_order(&activation_order(&mods, &ignore)?, args.numbered) {
        println!("{line}");
    }
    Ok(())
}
