// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Format detection and dispatch.
//!
//! ```text
//! first non-blank line
//!   == "RMM_V2_MODLIST"             --> V3
//!   == "rmm_modlist_v2"             --> V2
//!   "<int>#..."                     --> V1
//!   contains "::"                   --> V2 (headerless)
//!   "pkg,<int|empty>,url" (3 cols)  --> V3 (headerless)
//!   otherwise                       --> UnrecognizedFormat | fallback
//! ```
//!
//! Detection only inspects the first non-blank line; it never parses the
//! rest of the input.

use tracing::{debug, info};

use super::v2::SEPARATOR;
use super::v3::split_row;
use super::{FormatVersion, ListCodec, V1Format, V2Format, V3Format};
use crate::error::ListError;
use crate::model::{ModCollection, ModRecord};

const PREVIEW_CHARS: usize = 40;

/// A parsed mod list together with what was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedList {
    pub version: FormatVersion,
    pub collection: ModCollection,
    pub diagnostics: Vec<ListError>,
}

/// Detects list formats and dispatches to the matching codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatRegistry {
    fallback: Option<FormatVersion>,
}

impl FormatRegistry {
    /// Creates a registry that rejects unrecognized input.
    #[must_use]
    pub const fn new() -> Self {
        Self { fallback: None }
    }

    /// Uses `version` when detection fails instead of rejecting the input.
    #[must_use]
    pub const fn with_fallback(mut self, version: FormatVersion) -> Self {
        self.fallback = Some(version);
        self
    }

    #[must_use]
    pub const fn fallback(&self) -> Option<FormatVersion> {
        self.fallback
    }

    /// Detects which format produced `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::UnrecognizedFormat`] if no format matches.
    pub fn detect(text: &str) -> std::result::Result<FormatVersion, ListError> {
        let Some(first) = text.lines().map(str::trim).find(|l| !l.is_empty()) else {
            return Err(ListError::UnrecognizedFormat {
                preview: String::new(),
            });
        };

        for version in FormatVersion::ALL {
            if version.header() == Some(first) {
                return Ok(version);
            }
        }

        // V1 annotations are free text and may contain "::"
        if let Some((id, _)) = first.split_once('#')
            && id.trim().parse::<u64>().is_ok()
        {
            return Ok(FormatVersion::V1);
        }

        if first.contains(SEPARATOR) {
            return Ok(FormatVersion::V2);
        }

        if let Ok(fields) = split_row(first)
            && fields.len() == 3
            && !fields[0].trim().is_empty()
            && (fields[1].trim().is_empty() || fields[1].trim().parse::<u64>().is_ok())
        {
            return Ok(FormatVersion::V3);
        }

        Err(ListError::UnrecognizedFormat {
            preview: first.chars().take(PREVIEW_CHARS).collect(),
        })
    }

    /// Detects the format (or applies the fallback) and parses `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::UnrecognizedFormat`] if detection fails and no
    /// fallback is configured.
    pub fn decode(&self, text: &str) -> std::result::Result<DecodedList, ListError> {
        let version = match Self::detect(text) {
            Ok(version) => version,
            Err(err) => match self.fallback {
                Some(fallback) => {
                    info!(fallback = %fallback, "Unrecognized list format, using fallback");
                    fallback
                }
                None => return Err(err),
            },
        };
        Ok(Self::decode_as(version, text))
    }

    /// Parses `text` with a known format.
    #[must_use]
    pub fn decode_as(version: FormatVersion, text: &str) -> DecodedList {
        let (collection, diagnostics) = match version {
            FormatVersion::V1 => collect(V1Format::parse(text)),
            FormatVersion::V2 => collect(V2Format::parse(text)),
            FormatVersion::V3 => collect(V3Format::parse(text)),
        };

        debug!(
            format = %version,
            records = collection.len(),
            skipped = diagnostics.len(),
            "Decoded mod list"
        );

        DecodedList {
            version,
            collection,
            diagnostics,
        }
    }

    /// Serializes `mods` in `version`, header line first.
    pub fn encode<'a>(
        version: FormatVersion,
        mods: &'a ModCollection,
    ) -> Box<dyn Iterator<Item = String> + 'a> {
        let header = version.header().map(str::to_string).into_iter();
        match version {
            FormatVersion::V1 => Box::new(header.chain(V1Format::serialize(mods))),
            FormatVersion::V2 => Box::new(header.chain(V2Format::serialize(mods))),
            FormatVersion::V3 => Box::new(header.chain(V3Format::serialize(mods))),
        }
    }
}

fn collect<C: ListCodec>(mut records: super::Records<'_, C>) -> (ModCollection, Vec<ListError>) {
    let collection: ModCollection = records.by_ref().collect::<Vec<ModRecord>>().into();
    (collection, records.into_diagnostics())
}
