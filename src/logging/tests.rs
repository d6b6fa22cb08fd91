// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_conversion() {
    let conversions = vec![
        ("from_int(-1)", LogLevel::from_int(-1)),
        ("from_int(3)", LogLevel::from_int(3)),
        ("from_int(100)", LogLevel::from_int(100)),
        ("from_u8(7)", LogLevel::from_u8(7).unwrap_or_default()),
    ];
    insta::assert_debug_snapshot!(conversions, @r#"
    [
        (
            "from_int(-1)",
            LogLevel(
                0,
            ),
        ),
        (
            "from_int(3)",
            LogLevel(
                3,
            ),
        ),
        (
            "from_int(100)",
            LogLevel(
                6,
            ),
        ),
        (
            "from_u8(7)",
            LogLevel(
                3,
            ),
        ),
    ]
    "#);
}

#[test]
fn test_filter_strings() {
    let filters: Vec<String> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();
    assert_eq!(
        filters,
        [
            "off",
            "error",
            "warn",
            "warn,rmm_rs=info",
            "warn,rmm_rs=debug",
            "warn,rmm_rs=trace",
            "trace"
        ]
    );
}

#[test]
fn test_log_level_rejects_out_of_range() {
    let err = LogLevel::new(9).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 9"
    );
    assert_eq!(LogLevel::try_from(4).unwrap(), LogLevel::DEBUG);
    assert_eq!(LogLevel::DUMP.to_string(), "6 (dump)");
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert!(config.log_file().is_none());
    assert!(!config.show_target());
}
