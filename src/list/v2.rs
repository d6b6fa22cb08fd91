// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `::`-separated list format.
//!
//! ```text
//! rmm_modlist_v2                                   <- header
//! jaxe.rimhud::1508850027::https://github.com/...  <- pkg::steam::repo
//! ```

use super::{FormatVersion, LineOutcome, ListCodec, non_empty, or_empty, parse_steam_id};
use crate::model::ModRecord;

/// Field separator.
pub const SEPARATOR: &str = "::";

/// Package id / steam id / repo url list format.
#[derive(Debug, Clone, Copy, Default)]
pub struct V2Format;

impl ListCodec for V2Format {
    const VERSION: FormatVersion = FormatVersion::V2;
    const HEADER: Option<&'static str> = Some("rmm_modlist_v2");

    fn parse_line(line: &str) -> LineOutcome {
        if line.trim().is_empty() {
            return LineOutcome::Blank;
        }
        if !line.contains(SEPARATOR) {
            return LineOutcome::Malformed(format!("missing '{SEPARATOR}' separator"));
        }

        // The repo url keeps any further separators.
        let mut fields = line.splitn(3, SEPARATOR);
        let package_id = fields.next().unwrap_or_default().trim();
        let steam_id = fields.next().unwrap_or_default();
        let repo_url = fields.next().unwrap_or_default();

        if package_id.is_empty() {
            return LineOutcome::Malformed("empty package id".to_string());
        }

        match parse_steam_id(steam_id) {
            Ok(steam_id) => LineOutcome::Record(ModRecord {
                package_id: package_id.to_string(),
                steam_id,
                repo_url: non_empty(repo_url),
                ..ModRecord::default()
            }),
            Err(reason) => LineOutcome::Malformed(reason),
        }
    }

    fn format_record(record: &ModRecord) -> String {
        [
            record.package_id.clone(),
            or_empty(record.steam_id.as_ref()),
            or_empty(record.repo_url.as_ref()),
        ]
        .join(SEPARATOR)
    }
}
