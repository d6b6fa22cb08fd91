// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text decoding for list files and mod metadata (UTF-8 ← UTF-16/CP1252).
//!
//! ```text
//! bytes --detect_encoding--> BOM?  UTF-8 / UTF-16 LE / UTF-16 BE
//!                            valid UTF-8? --> Utf8
//!                            otherwise    --> Acp (Windows-1252)
//!       --bytes_to_utf8----> UTF-8 (BOM stripped, invalid -> U+FFFD)
//! ```
//!
//! Lists written by older tools on Windows are often CP1252.

use encoding_rs::{UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252};
use std::borrow::Cow;

/// Source encoding of a text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8, with or without BOM
    #[default]
    Utf8,
    /// UTF-16 Little Endian (BOM required)
    Utf16Le,
    /// UTF-16 Big Endian (BOM required)
    Utf16Be,
    /// Active Code Page - typically Windows-1252
    Acp,
}

/// Guesses the encoding of `bytes`.
///
/// A byte order mark wins; otherwise valid UTF-8 is taken as UTF-8 and
/// anything else as Windows-1252.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> Encoding {
    if let Some((encoding, _)) = encoding_rs::Encoding::for_bom(bytes) {
        if encoding == UTF_16LE {
            return Encoding::Utf16Le;
        }
        if encoding == UTF_16BE {
            return Encoding::Utf16Be;
        }
        return Encoding::Utf8;
    }

    if std::str::from_utf8(bytes).is_ok() {
        Encoding::Utf8
    } else {
        Encoding::Acp
    }
}

/// Converts bytes from the given encoding to UTF-8.
///
/// A leading BOM matching `encoding` is removed. Invalid sequences are
/// replaced with U+FFFD.
///
/// # Example
/// ```
/// use rmm_rs::utility::encoding::{bytes_to_utf8, Encoding};
///
/// let cp1252_bytes = b"caf\xe9"; // "café" in Windows-1252
/// let utf8 = bytes_to_utf8(Encoding::Acp, cp1252_bytes);
/// assert_eq!(utf8, "café");
/// ```
#[must_use]
pub fn bytes_to_utf8(encoding: Encoding, bytes: &[u8]) -> Cow<'_, str> {
    match encoding {
        Encoding::Utf8 => UTF_8.decode_with_bom_removal(bytes).0,
        Encoding::Utf16Le => UTF_16LE.decode_with_bom_removal(bytes).0,
        Encoding::Utf16Be => UTF_16BE.decode_with_bom_removal(bytes).0,
        Encoding::Acp => WINDOWS_1252.decode_without_bom_handling(bytes).0,
    }
}

/// Detects the encoding of `bytes` and converts them to UTF-8.
#[must_use]
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    bytes_to_utf8(detect_encoding(bytes), bytes)
}

#[cfg(test)]
mod tests;
