// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Record suppliers.
//!
//! ```text
//! mods/                      FolderScanner::scan()
//!   SomeMod/                   ignore::WalkParallel (depth 1)
//!     About/About.xml    --->    read_mod_dir() per directory
//!     About/PublishedFileId.txt    --flume--> collect, sort by path
//!     .rmm_ignore                  --> ModCollection named after the root
//! ```
//!
//! Directories without readable metadata are skipped with a warning; only a
//! missing root fails the scan.

pub mod about;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bon::Builder;
use flume::unbounded;
use ignore::{WalkBuilder, WalkState};
use tracing::{debug, info, warn};

use crate::error::{RmmResult, ScanError};
use crate::model::{ModCollection, ModRecord};
use crate::utility::encoding::decode_text;

pub use about::{AboutMetadata, AboutParser};

/// Worker threads used by the folder scanner unless configured otherwise.
pub const DEFAULT_SCAN_THREADS: usize = 16;

/// File whose presence marks a mod as ignored.
pub const IGNORE_MARKER: &str = ".rmm_ignore";

/// Produces the records the ordering and list code work on.
pub trait RecordSupplier {
    /// Returns every record this supplier knows about.
    ///
    /// # Errors
    ///
    /// Returns an error when the source as a whole cannot be read.
    fn supply(&self) -> RmmResult<ModCollection>;
}

impl RecordSupplier for ModCollection {
    fn supply(&self) -> RmmResult<ModCollection> {
        Ok(self.clone())
    }
}

/// Options for [`FolderScanner`].
#[derive(Debug, Clone, Builder)]
pub struct ScanOptions {
    /// Number of walker threads
    #[builder(setters(name = with_threads), default = DEFAULT_SCAN_THREADS)]
    threads: usize,
    /// Value stamped into `workshop_managed` on every record
    #[builder(setters(name = with_workshop_managed))]
    workshop_managed: Option<bool>,
    /// Follow symbolic links to mod directories
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ScanOptions {
    #[must_use]
    pub const fn threads(&self) -> usize {
        self.threads
    }

    #[must_use]
    pub const fn workshop_managed(&self) -> Option<bool> {
        self.workshop_managed
    }

    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }
}

/// Reads one mod per subdirectory of a mods folder.
#[derive(Debug, Clone)]
pub struct FolderScanner {
    root: PathBuf,
    options: ScanOptions,
}

impl FolderScanner {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, options: ScanOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scans the root directory in parallel.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::RootNotFound`] if the root is not a directory.
    pub fn scan(&self) -> RmmResult<ModCollection> {
        if !self.root.is_dir() {
            return Err(ScanError::RootNotFound(self.root.display().to_string()).into());
        }

        let parser = Arc::new(AboutParser::new()?);
        let workshop_managed = self.options.workshop_managed();
        let (tx, rx) = unbounded::<Result<ModRecord, ScanError>>();

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .hidden(true)
            .max_depth(Some(1))
            .follow_links(self.options.follow_links())
            .threads(self.options.threads().max(1));

        builder.build_parallel().run(|| {
            let tx = tx.clone();
            let parser = Arc::clone(&parser);

            Box::new(move |entry| {
                match entry {
                    Ok(entry) => {
                        if entry.depth() == 1 && entry.file_type().is_some_and(|ft| ft.is_dir()) {
                            let _ = tx.send(read_mod_dir(&parser, entry.path(), workshop_managed));
                        }
                    }
                    Err(e) => warn!(error = %e, "walk error"),
                }
                WalkState::Continue
            })
        });

        drop(tx);

        let mut records: Vec<ModRecord> = rx
            .iter()
            .filter_map(|result| match result {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "Skipping mod directory");
                    None
                }
            })
            .collect();
        records.sort_by(|a, b| a.path.cmp(&b.path));

        let mut mods = ModCollection::from(records);
        if let Some(name) = self.root.file_name() {
            mods = mods.with_name(name.to_string_lossy().into_owned());
        }

        info!(root = %self.root.display(), mods = mods.len(), "Scanned mods directory");
        Ok(mods)
    }
}

impl RecordSupplier for FolderScanner {
    fn supply(&self) -> RmmResult<ModCollection> {
        self.scan()
    }
}

/// Builds a record from one mod directory.
///
/// # Errors
///
/// Returns [`ScanError::Metadata`] if `About/About.xml` is missing or has no
/// `packageId`. A missing or invalid `PublishedFileId.txt` only leaves the
/// Steam id unset.
pub fn read_mod_dir(
    parser: &AboutParser,
    dir: &Path,
    workshop_managed: Option<bool>,
) -> Result<ModRecord, ScanError> {
    let about_path = dir.join("About").join("About.xml");
    let metadata = |message: String| ScanError::Metadata {
        path: about_path.display().to_string(),
        message,
    };

    let bytes = std::fs::read(&about_path).map_err(|e| metadata(e.to_string()))?;
    let about = parser.parse(&decode_text(&bytes)).map_err(metadata)?;

    Ok(ModRecord {
        package_id: about.package_id,
        before: about.before,
        after: about.after,
        incompatible: about.incompatible,
        path: Some(dir.to_path_buf()),
        author: about.author,
        name: about.name,
        versions: about.versions,
        steam_id: read_steam_id(dir),
        ignored: dir.join(IGNORE_MARKER).is_file(),
        repo_url: None,
        workshop_managed,
    })
}

fn read_steam_id(dir: &Path) -> Option<u64> {
    let path = dir.join("About").join("PublishedFileId.txt");
    let bytes = std::fs::read(&path).ok()?;
    let text = decode_text(&bytes);

    match text.trim().parse() {
        Ok(id) => Some(id),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Ignoring invalid PublishedFileId.txt");
            None
        }
    }
}
