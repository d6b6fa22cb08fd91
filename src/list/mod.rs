// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Versioned mod list formats.
//!
//! ```text
//!            text                              ModCollection
//!              |                                     |
//!              v                                     v
//!   registry::detect --> V1 | V2 | V3      ListCodec::serialize
//!              |                                     |
//!              v                                     v
//!   ListCodec::parse (lazy)                  lines (lazy, no EOL)
//!     Records ---> ModRecord*                        |
//!        \                                           v
//!         +--> diagnostics (MalformedEntry)   registry::encode (+header)
//! ```
//!
//! | Version | Fields | Line shape |
//! |---------|--------|------------|
//! | V1 | steam id | `<steamId># <name> by <author> ` |
//! | V2 | package id, steam id, repo url | `pkg::steamId::url` |
//! | V3 | package id, steam id, repo url | CSV row |
//!
//! Malformed lines never abort parsing: they are logged, kept as
//! [`ListError::MalformedEntry`] diagnostics and skipped.

pub mod registry;
pub mod v1;
pub mod v2;
pub mod v3;


use std::fmt;
use std::iter::Enumerate;
use std::marker::PhantomData;
use std::str::{FromStr, Lines as TextLines};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, ListError};
use crate::model::ModRecord;

pub use registry::{DecodedList, FormatRegistry};
pub use v1::V1Format;
pub use v2::V2Format;
pub use v3::V3Format;

/// Mod list format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatVersion {
    V1,
    V2,
    #[default]
    V3,
}

impl FormatVersion {
    /// All versions, oldest first.
    pub const ALL: [Self; 3] = [Self::V1, Self::V2, Self::V3];

    /// The oldest format, used as a fallback for undetectable input.
    pub const OLDEST: Self = Self::V1;

    /// Whether reloading a serialized list restores package ids.
    #[must_use]
    pub const fn is_lossless(self) -> bool {
        !matches!(self, Self::V1)
    }

    /// Header line written before the records, if the format has one.
    #[must_use]
    pub const fn header(self) -> Option<&'static str> {
        match self {
            Self::V1 => V1Format::HEADER,
            Self::V2 => V2Format::HEADER,
            Self::V3 => V3Format::HEADER,
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2 => write!(f, "v2"),
            Self::V3 => write!(f, "v3"),
        }
    }
}

impl FromStr for FormatVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "2" => Ok(Self::V2),
            "v3" | "3" => Ok(Self::V3),
            _ => Err(ConfigError::InvalidValue {
                section: "list".to_string(),
                key: "format".to_string(),
                message: format!("expected 'v1', 'v2' or 'v3', got '{s}'"),
            }),
        }
    }
}

/// Result of parsing a single line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// The line produced a record.
    Record(ModRecord),
    /// Nothing to parse, skipped silently.
    Blank,
    /// The line is malformed; carries the reason.
    Malformed(String),
}

/// A line-oriented mod list format.
pub trait ListCodec: Sized {
    const VERSION: FormatVersion;

    /// Header line identifying the format, skipped when parsing.
    const HEADER: Option<&'static str>;

    /// Parses one line (without terminator).
    fn parse_line(line: &str) -> LineOutcome;

    /// Formats one record as a single line (without terminator).
    fn format_record(record: &ModRecord) -> String;

    /// Lazily parses `text`. Call again to restart from the beginning.
    fn parse(text: &str) -> Records<'_, Self> {
        Records::new(text)
    }

    /// Lazily serializes records, one line per record.
    fn serialize<'a, I>(records: I) -> Lines<I::IntoIter, Self>
    where
        I: IntoIterator<Item = &'a ModRecord>,
    {
        Lines::new(records.into_iter())
    }
}

/// Lazy record iterator over list text.
///
/// Malformed lines are logged and collected; read them with
/// [`Records::diagnostics`] once iteration is done.
pub struct Records<'a, C> {
    lines: Enumerate<TextLines<'a>>,
    header_checked: bool,
    diagnostics: Vec<ListError>,
    codec: PhantomData<fn() -> C>,
}

impl<'a, C: ListCodec> Records<'a, C> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            header_checked: false,
            diagnostics: Vec::new(),
            codec: PhantomData,
        }
    }

    /// Malformed entries seen so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[ListError] {
        &self.diagnostics
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<ListError> {
        self.diagnostics
    }
}

impl<C: ListCodec> Iterator for Records<'_, C> {
    type Item = ModRecord;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, raw) in self.lines.by_ref() {
            let line = raw.trim_end_matches('\r');

            if !self.header_checked && !line.trim().is_empty() {
                self.header_checked = true;
                if C::HEADER == Some(line.trim()) {
                    continue;
                }
            }

            match C::parse_line(line) {
                LineOutcome::Record(record) => return Some(record),
                LineOutcome::Blank => {}
                LineOutcome::Malformed(reason) => {
                    warn!(
                        format = %C::VERSION,
                        line = index + 1,
                        content = line,
                        reason = %reason,
                        "Unable to import list entry"
                    );
                    self.diagnostics.push(ListError::MalformedEntry {
                        line: index + 1,
                        content: line.to_string(),
                        reason,
                    });
                }
            }
        }
        None
    }
}

/// Lazy line iterator over records.
pub struct Lines<I, C> {
    records: I,
    codec: PhantomData<fn() -> C>,
}

impl<I, C> Lines<I, C> {
    const fn new(records: I) -> Self {
        Self {
            records,
            codec: PhantomData,
        }
    }
}

impl<'a, I, C> Iterator for Lines<I, C>
where
    I: Iterator<Item = &'a ModRecord>,
    C: ListCodec,
{
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(C::format_record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

/// Renders an optional value as its text or an empty string.
pub(crate) fn or_empty<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(String::new, ToString::to_string)
}

/// Parses an optional steam id field; empty means absent.
pub(crate) fn parse_steam_id(field: &str) -> std::result::Result<Option<u64>, String> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(None);
    }
    field
        .parse::<u64>()
        .map(Some)
        .map_err(|_| format!("invalid steam id '{field}'"))
}

/// Treats an empty field as absent.
pub(crate) fn non_empty(field: &str) -> Option<String> {
    let field = field.trim();
    (!field.is_empty()).then(|| field.to_string())
}
