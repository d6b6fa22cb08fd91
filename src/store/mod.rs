// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod list persistence.
//!
//! ```text
//! import_list:  ListStore::read_text --> FormatRegistry::decode --> DecodedList
//! export_list:  FormatRegistry::encode --> "line\n"* --> ListStore::write_text
//! ```
//!
//! The list codecs never touch the filesystem; [`ListStore`] is the only
//! place where list text is read or written.


use std::path::Path;

use bon::Builder;
use tracing::{info, warn};

use crate::error::{RmmResult, StoreError, StoreResult};
use crate::list::{DecodedList, FormatRegistry, FormatVersion};
use crate::model::ModCollection;
use crate::utility::encoding::decode_text;

/// Reads and writes list text at a location.
pub trait ListStore {
    /// Reads the whole text at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the text cannot be read.
    fn read_text(&self, path: &Path) -> StoreResult<String>;

    /// Replaces the text at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the text cannot be written.
    fn write_text(&self, path: &Path, text: &str) -> StoreResult<()>;
}

/// Filesystem-backed [`ListStore`].
///
/// Reads accept UTF-8, UTF-16 with BOM and Windows-1252; writes are UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsListStore;

impl ListStore for FsListStore {
    fn read_text(&self, path: &Path) -> StoreResult<String> {
        let bytes = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(path.display().to_string())
            } else {
                StoreError::Read {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;
        Ok(decode_text(&bytes).into_owned())
    }

    fn write_text(&self, path: &Path, text: &str) -> StoreResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.display().to_string(),
                source,
            })?;
        }

        std::fs::write(path, text).map_err(|source| StoreError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Options for reading list files.
#[derive(Debug, Clone, Builder)]
pub struct ListOptions {
    /// Parse undetectable input with the oldest format instead of failing.
    #[builder(setters(name = with_fallback_to_oldest), default = false)]
    fallback_to_oldest: bool,
    /// Skip detection and parse with this format.
    #[builder(setters(name = with_format))]
    format: Option<FormatVersion>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ListOptions {
    #[must_use]
    pub const fn fallback_to_oldest(&self) -> bool {
        self.fallback_to_oldest
    }

    #[must_use]
    pub const fn format(&self) -> Option<FormatVersion> {
        self.format
    }

    const fn registry(&self) -> FormatRegistry {
        if self.fallback_to_oldest {
            FormatRegistry::new().with_fallback(FormatVersion::OLDEST)
        } else {
            FormatRegistry::new()
        }
    }
}

/// Reads and parses the list at `path`.
///
/// The resulting collection is named after the file stem.
///
/// # Errors
///
/// Returns an error if the store cannot read the file, or if the format is
/// not recognized and no fallback applies.
pub fn import_list<S: ListStore + ?Sized>(
    store: &S,
    path: &Path,
    options: &ListOptions,
) -> RmmResult<DecodedList> {
    let text = store.read_text(path)?;

    let mut decoded = match options.format() {
        Some(version) => FormatRegistry::decode_as(version, &text),
        None => options.registry().decode(&text)?,
    };

    if let Some(stem) = path.file_stem() {
        decoded.collection = std::mem::take(&mut decoded.collection)
            .with_name(stem.to_string_lossy().into_owned());
    }

    if !decoded.diagnostics.is_empty() {
        warn!(
            path = %path.display(),
            skipped = decoded.diagnostics.len(),
            "Some list entries could not be imported"
        );
    }
    info!(
        path = %path.display(),
        format = %decoded.version,
        mods = decoded.collection.len(),
        "Imported mod list"
    );

    Ok(decoded)
}

/// Serializes `mods` in `version` and writes them to `path`.
///
/// Every line, header included, is terminated with `\n`.
///
/// # Errors
///
/// Returns an error if the store cannot write the file.
pub fn export_list<S: ListStore + ?Sized>(
    store: &S,
    path: &Path,
    mods: &ModCollection,
    version: FormatVersion,
) -> RmmResult<()> {
    let text = render_list(mods, version);
    store.write_text(path, &text)?;

    info!(
        path = %path.display(),
        format = %version,
        mods = mods.len(),
        "Exported mod list"
    );
    Ok(())
}

/// Renders the full file text for `mods` in `version`.
#[must_use]
pub fn render_list(mods: &ModCollection, version: FormatVersion) -> String {
    FormatRegistry::encode(version, mods).fold(String::new(), |mut text, line| {
        text.push_str(&line);
        text.push('\n');
        text
    })
}
