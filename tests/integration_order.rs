// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for load order resolution.
//!
//! Builds real mod folders, scans them and resolves the activation order.
//! Graph and resolver unit cases live in `src/order/tests.rs`.

use std::fs;
use std::path::Path;

use rmm_rs::config::types::OrderConfig;
use rmm_rs::model::{ModCollection, ModRecord};
use rmm_rs::order::{IgnoreSet, resolve};
use rmm_rs::scan::{FolderScanner, RecordSupplier, ScanOptions};

fn write_mod(root: &Path, dir: &str, about: &str) {
    let about_dir = root.join(dir).join("About");
    fs::create_dir_all(&about_dir).unwrap();
    fs::write(about_dir.join("About.xml"), about).unwrap();
}

fn about(package_id: &str, before: &[&str], after: &[&str]) -> String {
    let items = |ids: &[&str]| ids.iter().map(|id| format!("<li>{id}</li>")).collect::<String>();
    format!(
        "<?xml version=\"1.0\"?>\n<ModMetaData>\n  <packageId>{package_id}</packageId>\n  \
         <loadBefore>{}</loadBefore>\n  <loadAfter>{}</loadAfter>\n</ModMetaData>\n",
        items(before),
        items(after)
    )
}

fn position(order: &[String], id: &str) -> usize {
    order.iter().position(|m| m == id).unwrap()
}

// =============================================================================
// Scan -> order
// =============================================================================

#[test]
fn order_scanned_folder() {
    let dir = tempfile::tempdir().unwrap();
    write_mod(dir.path(), "01_ui", &about("ui.mod", &[], &["core.lib"]));
    write_mod(dir.path(), "02_core", &about("core.lib", &[], &["brrainz.harmony"]));
    write_mod(dir.path(), "03_harmony", &about("brrainz.harmony", &["Ludeon.RimWorld"], &[]));
    write_mod(dir.path(), "04_patch", &about("patch.mod", &["ui.mod"], &["core.lib"]));

    let mods = FolderScanner::new(dir.path(), ScanOptions::default())
        .supply()
        .unwrap();
    let order = mods.activation_order(&OrderConfig::default().ignore).unwrap();

    assert_eq!(order, ["brrainz.harmony", "core.lib", "patch.mod", "ui.mod"]);
}

#[test]
fn order_respects_every_edge() {
    let dir = tempfile::tempdir().unwrap();
    let mods = [
        ("a", vec![], vec!["e"]),
        ("b", vec!["a"], vec![]),
        ("c", vec![], vec!["b", "d"]),
        ("d", vec!["a"], vec![]),
        ("e", vec![], vec![]),
    ];
    for (id, before, after) in &mods {
        write_mod(dir.path(), id, &about(id, before, after));
    }

    let collection = FolderScanner::new(dir.path(), ScanOptions::default())
        .scan()
        .unwrap();
    let order = collection.load_order(&IgnoreSet::new()).unwrap();

    let graph = collection.dependency_graph(&IgnoreSet::new());
    for (from, to) in graph.edges() {
        assert!(
            position(&order, from) < position(&order, to),
            "{from} must precede {to} in {order:?}"
        );
    }
    assert_eq!(order.len(), mods.len());
}

#[test]
fn order_ignored_marker_removes_mod() {
    let dir = tempfile::tempdir().unwrap();
    write_mod(dir.path(), "a", &about("a", &["b"], &[]));
    write_mod(dir.path(), "b", &about("b", &[], &[]));
    write_mod(dir.path(), "c", &about("c", &[], &["b"]));
    fs::write(dir.path().join("b").join(".rmm_ignore"), "").unwrap();

    let mods = FolderScanner::new(dir.path(), ScanOptions::default())
        .scan()
        .unwrap();
    assert!(mods.find("b").is_some_and(|m| m.ignored));

    let order = mods.activation_order(&IgnoreSet::new()).unwrap();
    assert_eq!(order, ["a", "c"]);
}

// =============================================================================
// Cycles
// =============================================================================

#[test]
fn order_reports_every_cycle_member() {
    let mods: ModCollection = vec![
        ModRecord::builder()
            .with_package_id("x")
            .with_before(vec!["y".into()])
            .build(),
        ModRecord::builder()
            .with_package_id("y")
            .with_before(vec!["z".into()])
            .build(),
        ModRecord::builder()
            .with_package_id("z")
            .with_before(vec!["x".into(), "tail".into()])
            .build(),
        ModRecord::new("tail"),
        ModRecord::builder()
            .with_package_id("p")
            .with_after(vec!["q".into()])
            .build(),
        ModRecord::builder()
            .with_package_id("q")
            .with_after(vec!["p".into()])
            .build(),
    ]
    .into();

    let cycle = mods.load_order(&IgnoreSet::new()).unwrap_err();

    assert_eq!(cycle.members(), ["x", "y", "z", "p", "q"]);
    assert!(!cycle.contains("tail"));
    insta::assert_snapshot!(cycle.to_string(), @"dependency cycle among: x <-> y <-> z; p <-> q");
}

#[test]
fn order_ignore_set_breaks_cycle_through_library() {
    let mods: ModCollection = vec![
        ModRecord::builder()
            .with_package_id("brrainz.harmony")
            .with_before(vec!["a".into()])
            .build(),
        ModRecord::builder()
            .with_package_id("a")
            .with_before(vec!["brrainz.harmony".into()])
            .build(),
    ]
    .into();

    assert!(mods.load_order(&IgnoreSet::new()).is_err());
    let order = mods.activation_order(&OrderConfig::default().ignore).unwrap();
    assert_eq!(order, ["brrainz.harmony", "a"]);
}

#[test]
fn order_resolve_with_explicit_tie_break() {
    let mods: ModCollection = ["m1", "m2", "m3"].into_iter().map(ModRecord::new).collect();
    let graph = mods.dependency_graph(&IgnoreSet::new());

    let order = resolve(&graph, &["m3", "m1", "m2"]).unwrap();
    assert_eq!(order, ["m3", "m1", "m2"]);
}
