// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   detect_encoding()  BOM / UTF-8 / CP1252 sniffing
//!   decode_text()      any of the above --> UTF-8
//! ```

pub mod encoding;
