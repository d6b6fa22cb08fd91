// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use crate::list::FormatVersion;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["rmm", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "rmm",
        "-l",
        "5",
        "-p",
        "/games/RimWorld",
        "--ini",
        "a.toml",
        "--ini",
        "b.toml",
        "list",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(cli.global.game, Some(PathBuf::from("/games/RimWorld")));
    assert_eq!(cli.global.inis.len(), 2);
    assert!(matches!(cli.command, Some(Command::List(ref args)) if !args.json));
}

#[test]
fn test_parse_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["rmm", "-l", "7", "list"]).is_err());
}

#[test]
fn test_parse_query_requires_terms() {
    assert!(Cli::try_parse_from(["rmm", "query"]).is_err());

    let cli = Cli::try_parse_from(["rmm", "query", "harmony", "brrainz"]).unwrap();
    let Some(Command::Query(args)) = cli.command else {
        panic!("expected query command");
    };
    assert_eq!(args.terms, ["harmony", "brrainz"]);
}

#[test]
fn test_parse_export_format() {
    let cli = Cli::try_parse_from(["rmm", "export", "mods.txt", "-f", "v2", "--ordered"]).unwrap();
    let Some(Command::Export(args)) = cli.command else {
        panic!("expected export command");
    };
    assert_eq!(args.file, PathBuf::from("mods.txt"));
    assert_eq!(args.format, Some(FormatVersion::V2));
    assert!(args.ordered);

    let err = Cli::try_parse_from(["rmm", "export", "mods.txt", "-f", "v4"]).unwrap_err();
    assert!(err.to_string().contains("expected 'v1', 'v2' or 'v3'"));
}

#[test]
fn test_parse_convert() {
    let cli = Cli::try_parse_from(["rmm", "convert", "old.txt", "new.csv", "--format", "3"]).unwrap();
    let Some(Command::Convert(args)) = cli.command else {
        panic!("expected convert command");
    };
    assert_eq!(args.input, PathBuf::from("old.txt"));
    assert_eq!(args.output, PathBuf::from("new.csv"));
    assert_eq!(args.format, Some(FormatVersion::V3));
}

#[test]
fn test_parse_order_extra_ignores() {
    let cli = Cli::try_parse_from(["rmm", "order", "-n", "--ignore", "a.mod", "--ignore", "b.mod"])
        .unwrap();
    let Some(Command::Order(args)) = cli.command else {
        panic!("expected order command");
    };
    assert!(args.numbered);
    assert_eq!(args.ignore, ["a.mod", "b.mod"]);
}

#[test]
fn test_config_overrides() {
    let cli = Cli::try_parse_from([
        "rmm",
        "-l",
        "4",
        "-w",
        "/steam/294100",
        "-s",
        "list/format=v1",
        "--set",
        "order.ignore = x.mod",
        "options",
    ])
    .unwrap();

    insta::assert_debug_snapshot!(cli.global.to_config_overrides().unwrap(), @r#"
    [
        (
            "list.format",
            "v1",
        ),
        (
            "order.ignore",
            "x.mod",
        ),
        (
            "global.output_log_level",
            "4",
        ),
        (
            "global.file_log_level",
            "4",
        ),
        (
            "paths.workshop",
            "/steam/294100",
        ),
    ]
    "#);
}

#[test]
fn test_config_override_without_value() {
    let cli = Cli::try_parse_from(["rmm", "-s", "list.format", "options"]).unwrap();
    let err = cli.global.to_config_overrides().unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'set' in section '[cli]': expected KEY=VALUE: 'list.format'"
    );
}
