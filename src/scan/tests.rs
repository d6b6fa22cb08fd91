// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::Path;

use super::about::unescape;
use super::{AboutParser, FolderScanner, RecordSupplier, ScanOptions, read_mod_dir};
use crate::error::{RmmError, ScanError};
use crate::model::{ModCollection, ModRecord};

const HARMONY_ABOUT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ModMetaData>
  <!-- <packageId>commented.out</packageId> -->
  <name>Harmony</name>
  <packageId>brrainz.harmony</packageId>
  <author>Andreas Pardeike</author>
  <supportedVersions>
    <li>1.4</li>
    <li>1.5</li>
  </supportedVersions>
  <loadBefore>
    <li>Ludeon.RimWorld</li>
  </loadBefore>
  <description>Patching &amp; things <b>inline</b></description>
</ModMetaData>
"#;

fn write_mod(root: &Path, dir: &str, about: &str) {
    let about_dir = root.join(dir).join("About");
    fs::create_dir_all(&about_dir).unwrap();
    fs::write(about_dir.join("About.xml"), about).unwrap();
}

fn about_xml(package_id: &str, extra: &str) -> String {
    format!("<ModMetaData><packageId>{package_id}</packageId>{extra}</ModMetaData>")
}

#[test]
fn test_parse_about_fields() {
    let about = AboutParser::new().unwrap().parse(HARMONY_ABOUT).unwrap();

    assert_eq!(about.package_id, "brrainz.harmony");
    assert_eq!(about.name.as_deref(), Some("Harmony"));
    assert_eq!(about.author.as_deref(), Some("Andreas Pardeike"));
    assert_eq!(about.versions, ["1.4", "1.5"]);
    assert_eq!(about.before, ["Ludeon.RimWorld"]);
    assert!(about.after.is_empty());
}

#[test]
fn test_parse_about_merges_forced_lists_and_authors() {
    let xml = about_xml(
        "a.mod",
        "<authors><li>Ann</li><li>Bob</li></authors>\
         <loadAfter><li>b.mod</li></loadAfter>\
         <forceLoadAfter><li>b.mod</li><li>c.mod</li></forceLoadAfter>\
         <forceLoadBefore><li IfModActive=\"x\">d.mod</li></forceLoadBefore>\
         <incompatibleWith><li>e.mod</li></incompatibleWith>",
    );
    let about = AboutParser::new().unwrap().parse(&xml).unwrap();

    assert_eq!(about.author.as_deref(), Some("Ann, Bob"));
    assert_eq!(about.after, ["b.mod", "c.mod"]);
    assert_eq!(about.before, ["d.mod"]);
    assert_eq!(about.incompatible, ["e.mod"]);
}

#[test]
fn test_parse_about_ignores_nested_package_ids() {
    let xml = "<ModMetaData>\
        <modDependencies><li><packageId>dep.mod</packageId></li></modDependencies>\
        <packageId>top.mod</packageId>\
        </ModMetaData>";
    let about = AboutParser::new().unwrap().parse(xml).unwrap();
    assert_eq!(about.package_id, "top.mod");
}

#[test]
fn test_parse_about_cdata_is_text() {
    let xml = about_xml(
        "cdata.mod",
        "<name><![CDATA[Tools & <Things>]]></name>\
         <description><![CDATA[Line one<br>Line two</p>]]></description>\
         <loadAfter><li>b.mod</li></loadAfter>",
    );
    let about = AboutParser::new().unwrap().parse(&xml).unwrap();

    assert_eq!(about.package_id, "cdata.mod");
    assert_eq!(about.name.as_deref(), Some("Tools & <Things>"));
    assert_eq!(about.after, ["b.mod"]);
}

#[test]
fn test_read_mod_dir_with_cdata_description() {
    let dir = tempfile::tempdir().unwrap();
    write_mod(
        dir.path(),
        "Described",
        &about_xml(
            "described.mod",
            "<description><![CDATA[Unbalanced <br> markup]]></description>",
        ),
    );

    let parser = AboutParser::new().unwrap();
    let record = read_mod_dir(&parser, &dir.path().join("Described"), None).unwrap();
    assert_eq!(record.package_id, "described.mod");
}

#[test]
fn test_parse_about_errors() {
    let parser = AboutParser::new().unwrap();
    let errors = [
        parser.parse("<ModMetaData><name>x</name></ModMetaData>"),
        parser.parse("not xml at all"),
        parser.parse("<ModMetaData><name>x</ModMetaData>"),
        parser.parse("<ModMetaData><packageId>a</packageId>"),
    ]
    .map(|r| r.unwrap_err());

    insta::assert_debug_snapshot!(errors, @r#"
    [
        "missing packageId",
        "no root element",
        "mismatched closing tag </ModMetaData> for <name>",
        "unclosed tag <ModMetaData>",
    ]
    "#);
}

#[test]
fn test_unescape() {
    assert_eq!(unescape("a &amp;lt; b &lt; &quot;c&quot;"), "a &lt; b < \"c\"");
    assert_eq!(unescape("plain"), "plain");
}

#[test]
fn test_read_mod_dir_reads_side_files() {
    let dir = tempfile::tempdir().unwrap();
    write_mod(dir.path(), "Harmony", HARMONY_ABOUT);
    let mod_dir = dir.path().join("Harmony");
    fs::write(mod_dir.join("About").join("PublishedFileId.txt"), "2009463077\r\n").unwrap();
    fs::write(mod_dir.join(".rmm_ignore"), "").unwrap();

    let record = read_mod_dir(&AboutParser::new().unwrap(), &mod_dir, Some(true)).unwrap();

    assert_eq!(record.package_id, "brrainz.harmony");
    assert_eq!(record.steam_id, Some(2_009_463_077));
    assert!(record.ignored);
    assert_eq!(record.workshop_managed, Some(true));
    assert_eq!(record.path.as_deref(), Some(mod_dir.as_path()));
}

#[test]
fn test_read_mod_dir_bad_steam_id_is_unset() {
    let dir = tempfile::tempdir().unwrap();
    write_mod(dir.path(), "m", &about_xml("m.mod", ""));
    let mod_dir = dir.path().join("m");
    fs::write(mod_dir.join("About").join("PublishedFileId.txt"), "n/a").unwrap();

    let record = read_mod_dir(&AboutParser::new().unwrap(), &mod_dir, None).unwrap();
    assert_eq!(record.steam_id, None);
    assert!(!record.ignored);
}

#[test]
fn test_read_mod_dir_without_about() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_mod_dir(&AboutParser::new().unwrap(), dir.path(), None).unwrap_err();
    assert!(matches!(err, ScanError::Metadata { .. }));
}

#[test]
fn test_scan_sorts_by_path_and_skips_broken() {
    let dir = tempfile::tempdir().unwrap();
    write_mod(dir.path(), "zeta", &about_xml("z.mod", ""));
    write_mod(dir.path(), "alpha", &about_xml("a.mod", ""));
    write_mod(dir.path(), "middle", &about_xml("m.mod", ""));
    write_mod(dir.path(), "broken", "<ModMetaData></ModMetaData>");
    fs::create_dir_all(dir.path().join("empty")).unwrap();
    fs::write(dir.path().join("stray.txt"), "not a mod").unwrap();

    let options = ScanOptions::builder().with_threads(4).build();
    let mods = FolderScanner::new(dir.path(), options).scan().unwrap();

    let ids: Vec<&str> = mods.package_ids().collect();
    assert_eq!(ids, ["a.mod", "m.mod", "z.mod"]);
    assert_eq!(
        mods.name(),
        dir.path().file_name().and_then(|n| n.to_str())
    );
}

#[test]
fn test_scan_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let scanner = FolderScanner::new(dir.path().join("missing"), ScanOptions::default());

    let err = scanner.supply().unwrap_err();
    assert!(matches!(err, RmmError::Scan(ref e) if matches!(**e, ScanError::RootNotFound(_))));
}

#[test]
fn test_collection_is_its_own_supplier() {
    let mods: ModCollection = vec![ModRecord::new("a.mod"), ModRecord::new("b.mod")].into();
    assert_eq!(mods.supply().unwrap(), mods);
}
