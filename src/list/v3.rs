// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CSV list format.
//!
//! ```text
//! RMM_V2_MODLIST                                   <- header (historical name)
//! jaxe.rimhud,1508850027,https://github.com/...    <- PACKAGE_ID,STEAM_ID,REPO_URL
//! "odd,id",,                                       <- minimal quoting
//! ```
//!
//! One row per line; quoted fields may contain commas and doubled quotes
//! but not line breaks.

use super::{FormatVersion, LineOutcome, ListCodec, non_empty, or_empty, parse_steam_id};
use crate::model::ModRecord;

const PACKAGE_ID: usize = 0;
const STEAM_ID: usize = 1;
const REPO_URL: usize = 2;
const COLUMNS: usize = 3;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// CSV list format.
#[derive(Debug, Clone, Copy, Default)]
pub struct V3Format;

impl ListCodec for V3Format {
    const VERSION: FormatVersion = FormatVersion::V3;
    const HEADER: Option<&'static str> = Some("RMM_V2_MODLIST");

    fn parse_line(line: &str) -> LineOutcome {
        if line.trim().is_empty() {
            return LineOutcome::Blank;
        }

        let fields = match split_row(line) {
            Ok(fields) => fields,
            Err(reason) => return LineOutcome::Malformed(reason.to_string()),
        };
        if fields.len() != COLUMNS {
            return LineOutcome::Malformed(format!(
                "expected {COLUMNS} columns, found {}",
                fields.len()
            ));
        }

        let package_id = fields[PACKAGE_ID].trim();
        if package_id.is_empty() {
            return LineOutcome::Malformed("empty package id".to_string());
        }

        match parse_steam_id(&fields[STEAM_ID]) {
            Ok(steam_id) => LineOutcome::Record(ModRecord {
                package_id: package_id.to_string(),
                steam_id,
                repo_url: non_empty(&fields[REPO_URL]),
                ..ModRecord::default()
            }),
            Err(reason) => LineOutcome::Malformed(reason),
        }
    }

    fn format_record(record: &ModRecord) -> String {
        [
            quote_field(&record.package_id),
            quote_field(&or_empty(record.steam_id.as_ref())),
            quote_field(&or_empty(record.repo_url.as_ref())),
        ]
        .join(",")
    }
}

/// Splits one CSV row into fields.
///
/// # Errors
///
/// Returns a reason if a quoted field is never closed.
pub(crate) fn split_row(line: &str) -> std::result::Result<Vec<String>, &'static str> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == QUOTE {
                if chars.peek() == Some(&QUOTE) {
                    chars.next();
                    field.push(QUOTE);
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            DELIMITER => fields.push(std::mem::take(&mut field)),
            QUOTE if field.is_empty() => in_quotes = true,
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field");
    }
    fields.push(field);
    Ok(fields)
}

/// Quotes a field only when it contains a delimiter, quote or line break.
fn quote_field(field: &str) -> String {
    if field.contains([DELIMITER, QUOTE, '\r', '\n']) {
        format!("{QUOTE}{}{QUOTE}", field.replace(QUOTE, "\"\""))
    } else {
        field.to_string()
    }
}
