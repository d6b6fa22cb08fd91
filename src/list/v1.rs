// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Oldest list format: one steam id per line.
//!
//! ```text
//! 1508850027# RimHUD by Jaxe
//! ^^^^^^^^^^  ^^^^^^^^^^^^^^^ annotation, not read back
//! steam id (split on first '#')
//! ```
//!
//! Lossy: reloading yields stub records carrying only the steam id.

use super::{FormatVersion, LineOutcome, ListCodec, or_empty};
use crate::model::ModRecord;

/// Steam-id-only list format.
#[derive(Debug, Clone, Copy, Default)]
pub struct V1Format;

impl ListCodec for V1Format {
    const VERSION: FormatVersion = FormatVersion::V1;
    const HEADER: Option<&'static str> = None;

    fn parse_line(line: &str) -> LineOutcome {
        if line.trim().is_empty() {
            return LineOutcome::Blank;
        }

        let steam_id = line.split_once('#').map_or(line, |(id, _)| id).trim();
        match steam_id.parse::<u64>() {
            Ok(id) => LineOutcome::Record(ModRecord::stub(id)),
            Err(_) => LineOutcome::Malformed(format!("invalid steam id '{steam_id}'")),
        }
    }

    fn format_record(record: &ModRecord) -> String {
        format!(
            "{}# {} by {} ",
            or_empty(record.steam_id.as_ref()),
            record.name.as_deref().unwrap_or_default(),
            record.author.as_deref().unwrap_or_default(),
        )
    }
}
