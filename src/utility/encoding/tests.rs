// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Encoding, bytes_to_utf8, decode_text, detect_encoding};

#[test]
fn test_utf8_passthrough() {
    let input = "Hello, 世界!";
    let result = bytes_to_utf8(Encoding::Utf8, input.as_bytes());
    insta::assert_snapshot!(result, @"Hello, 世界!");
}

#[test]
fn test_windows_1252_conversion() {
    // "café" in Windows-1252: 0x63 0x61 0x66 0xe9
    let input = b"caf\xe9";
    let result = bytes_to_utf8(Encoding::Acp, input);
    insta::assert_snapshot!(result, @"café");
}

#[test]
fn test_detect_encoding() {
    let cases = vec![
        ("utf8", detect_encoding("plain ascii".as_bytes())),
        ("utf8_bom", detect_encoding(b"\xef\xbb\xbfa::1::")),
        ("utf16le_bom", detect_encoding(b"\xff\xfeH\x00")),
        ("cp1252", detect_encoding(b"Caf\xe9 by Jos\xe9")),
    ];
    insta::assert_debug_snapshot!(cases, @r#"
    [
        (
            "utf8",
            Utf8,
        ),
        (
            "utf8_bom",
            Utf8,
        ),
        (
            "utf16le_bom",
            Utf16Le,
        ),
        (
            "cp1252",
            Acp,
        ),
    ]
    "#);
}

#[test]
fn test_decode_text_strips_bom() {
    assert_eq!(decode_text(b"\xef\xbb\xbfRMM_V2_MODLIST\n"), "RMM_V2_MODLIST\n");
    assert_eq!(decode_text(b"\xff\xfeH\x00i\x00"), "Hi");
    assert_eq!(decode_text(b"123# Caf\xe9 by Jos\xe9 "), "123# Café by José ");
}
