// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod records and ordered collections.
//!
//! ```text
//! supplier --> ModRecord* --> ModCollection (insertion order = tie-break)
//!                                  |
//!                   +--------------+--------------+
//!                   v                             v
//!             order::graph                   list codecs
//! ```
//!
//! `before` is literal: `m.before` lists ids that `m` loads before. The
//! About.xml `<loadBefore>` list feeds `before` and `<loadAfter>` feeds
//! `after`.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use bon::Builder;
use serde::Serialize;

/// Metadata and ordering constraints of one mod.
#[derive(Debug, Clone, Default, Builder, Serialize)]
pub struct ModRecord {
    /// Canonical identifier. Empty for stub records.
    #[builder(into, setters(name = with_package_id), default)]
    pub package_id: String,
    /// Package ids this mod loads before.
    #[builder(setters(name = with_before), default)]
    pub before: Vec<String>,
    /// Package ids this mod loads after.
    #[builder(setters(name = with_after), default)]
    pub after: Vec<String>,
    /// Package ids this mod conflicts with. Never used for ordering.
    #[builder(setters(name = with_incompatible), default)]
    pub incompatible: Vec<String>,
    #[builder(setters(name = with_path))]
    pub path: Option<PathBuf>,
    #[builder(into, setters(name = with_author))]
    pub author: Option<String>,
    #[builder(into, setters(name = with_name))]
    pub name: Option<String>,
    /// Supported game versions.
    #[builder(setters(name = with_versions), default)]
    pub versions: Vec<String>,
    /// Steam Workshop file id.
    #[builder(setters(name = with_steam_id))]
    pub steam_id: Option<u64>,
    /// Excluded from dependency edges when set.
    #[builder(setters(name = with_ignored), default)]
    pub ignored: bool,
    #[builder(into, setters(name = with_repo_url))]
    pub repo_url: Option<String>,
    /// Unknown when `None`.
    #[builder(setters(name = with_workshop_managed))]
    pub workshop_managed: Option<bool>,
}

impl ModRecord {
    /// Creates a record with only a package id.
    #[must_use]
    pub fn new(package_id: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            ..Self::default()
        }
    }

    /// Creates a stub record known only by its steam id.
    #[must_use]
    pub fn stub(steam_id: u64) -> Self {
        Self {
            steam_id: Some(steam_id),
            ..Self::default()
        }
    }

    /// Whether this record is still waiting for its package id.
    #[must_use]
    pub const fn is_stub(&self) -> bool {
        self.package_id.is_empty()
    }

    /// Case-insensitive match on name, author or package id, or an exact
    /// steam id match.
    #[must_use]
    pub fn matches_term(&self, term: &str) -> bool {
        if let Ok(id) = term.parse::<u64>()
            && self.steam_id == Some(id)
        {
            return true;
        }

        let needle = term.to_lowercase();
        [
            Some(self.package_id.as_str()),
            self.name.as_deref(),
            self.author.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl PartialEq for ModRecord {
    fn eq(&self, other: &Self) -> bool {
        if self.is_stub() || other.is_stub() {
            return self.steam_id.is_some() && self.steam_id == other.steam_id;
        }
        self.package_id == other.package_id
    }
}

impl PartialEq<str> for ModRecord {
    fn eq(&self, other: &str) -> bool {
        self.package_id == other
    }
}

impl PartialEq<&str> for ModRecord {
    fn eq(&self, other: &&str) -> bool {
        self.package_id == *other
    }
}

impl fmt::Display for ModRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_stub() {
            match self.steam_id {
                Some(id) => write!(f, "<stub {id}>"),
                None => write!(f, "<stub>"),
            }
        } else {
            write!(f, "{}", self.package_id)
        }
    }
}

/// Ordered sequence of mod records.
///
/// Insertion order is meaningful: it is the tie-break for load order
/// resolution. Package ids are expected to be unique but this is not
/// enforced; see [`ModCollection::duplicate_ids`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModCollection {
    name: Option<String>,
    mods: Vec<ModRecord>,
}

impl ModCollection {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            mods: Vec::new(),
        }
    }

    /// Creates an empty collection with a diagnostic name (e.g. "installed").
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            mods: Vec::new(),
        }
    }

    /// Sets the diagnostic name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn push(&mut self, record: ModRecord) {
        self.mods.push(record);
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.mods.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModRecord> {
        self.mods.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ModRecord> {
        self.mods.get(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ModRecord] {
        &self.mods
    }

    /// Finds the first record with the given package id.
    #[must_use]
    pub fn find(&self, package_id: &str) -> Option<&ModRecord> {
        self.mods.iter().find(|m| *m == package_id)
    }

    #[must_use]
    pub fn find_by_steam_id(&self, steam_id: u64) -> Option<&ModRecord> {
        self.mods.iter().find(|m| m.steam_id == Some(steam_id))
    }

    /// Index of the first record with the given package id.
    #[must_use]
    pub fn position(&self, package_id: &str) -> Option<usize> {
        self.mods.iter().position(|m| *m == package_id)
    }

    #[must_use]
    pub fn contains_id(&self, package_id: &str) -> bool {
        self.position(package_id).is_some()
    }

    /// Package ids in collection order, stubs skipped.
    pub fn package_ids(&self) -> impl Iterator<Item = &str> {
        self.mods
            .iter()
            .filter(|m| !m.is_stub())
            .map(|m| m.package_id.as_str())
    }

    /// Package ids that occur more than once, in order of first repeat.
    #[must_use]
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut reported = BTreeSet::new();
        let mut duplicates = Vec::new();

        for id in self.package_ids() {
            if !seen.insert(id) && reported.insert(id) {
                duplicates.push(id.to_string());
            }
        }

        duplicates
    }

    /// Records matching every search term (see [`ModRecord::matches_term`]).
    #[must_use]
    pub fn query(&self, terms: &[String]) -> Self {
        let mods = self
            .mods
            .iter()
            .filter(|m| terms.iter().all(|t| m.matches_term(t)))
            .cloned()
            .collect();

        Self {
            name: self.name.clone(),
            mods,
        }
    }
}

impl Extend<ModRecord> for ModCollection {
    fn extend<T: IntoIterator<Item = ModRecord>>(&mut self, iter: T) {
        self.mods.extend(iter);
    }
}

impl FromIterator<ModRecord> for ModCollection {
    fn from_iter<T: IntoIterator<Item = ModRecord>>(iter: T) -> Self {
        Self {
            name: None,
            mods: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<ModRecord>> for ModCollection {
    fn from(mods: Vec<ModRecord>) -> Self {
        Self { name: None, mods }
    }
}

impl IntoIterator for ModCollection {
    type Item = ModRecord;
    type IntoIter = std::vec::IntoIter<ModRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.mods.into_iter()
    }
}

impl<'a> IntoIterator for &'a ModCollection {
    type Item = &'a ModRecord;
    type IntoIter = std::slice::Iter<'a, ModRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.mods.iter()
    }
}
