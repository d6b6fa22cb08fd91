// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GraphBuilder, IgnoreSet, Incompatibility, resolve};
use crate::model::{ModCollection, ModRecord};

fn record(id: &str, before: &[&str], after: &[&str]) -> ModRecord {
    ModRecord::builder()
        .with_package_id(id)
        .with_before(before.iter().map(ToString::to_string).collect())
        .with_after(after.iter().map(ToString::to_string).collect())
        .build()
}

fn assert_respects_edges(mods: &ModCollection, ignore: &IgnoreSet, order: &[String]) {
    let graph = GraphBuilder::new(ignore).build(mods);
    let position = |id: &str| order.iter().position(|o| o == id).unwrap();
    for (from, to) in graph.edges() {
        assert!(position(from) < position(to), "{from} should load before {to}");
    }
}

// =============================================================================
// Graph construction
// =============================================================================

#[test]
fn test_before_and_after_edges() {
    let mods: ModCollection = vec![
        record("a", &["b"], &[]),
        record("b", &[], &[]),
        record("c", &[], &["b"]),
    ]
    .into();

    let graph = GraphBuilder::new(&IgnoreSet::new()).build(&mods);
    let edges: Vec<_> = graph.edges().collect();

    assert_eq!(edges, vec![("a", "b"), ("b", "c")]);
    assert_eq!(graph.successors("b").collect::<Vec<_>>(), vec!["c"]);
}

#[test]
fn test_unknown_reference_dropped() {
    let mods: ModCollection = vec![record("a", &["ghost.mod"], &[]), record("b", &[], &[])].into();

    let graph = GraphBuilder::new(&IgnoreSet::new()).build(&mods);

    assert!(!graph.contains("ghost.mod"));
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(
        resolve(&graph, &["a", "b"]),
        Ok(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn test_ignored_records_and_stubs_are_not_nodes() {
    let mut flagged = record("flagged", &["a"], &[]);
    flagged.ignored = true;
    let mods: ModCollection = vec![flagged, ModRecord::stub(1), record("a", &[], &[])].into();

    let graph = GraphBuilder::new(&IgnoreSet::new()).build(&mods);

    assert_eq!(graph.nodes(), ["a".to_string()]);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_ignore_set_drops_edges_both_ways() {
    let ignore: IgnoreSet = ["brrainz.harmony"].into_iter().collect();
    let mods: ModCollection = vec![
        record("brrainz.harmony", &["a"], &["b"]),
        record("a", &[], &["brrainz.harmony"]),
        record("b", &["brrainz.harmony"], &[]),
    ]
    .into();

    let graph = GraphBuilder::new(&ignore).build(&mods);

    assert!(!graph.contains("brrainz.harmony"));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_self_reference_and_duplicate_edges() {
    let mods: ModCollection = vec![record("a", &["a", "b", "b"], &[]), record("b", &[], &["a"])].into();

    let graph = GraphBuilder::new(&IgnoreSet::new()).build(&mods);

    assert!(!graph.has_edge("a", "a"));
    assert!(graph.has_edge("a", "b"));
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_incompatibilities_are_reported_not_enforced() {
    let mut a = record("a", &[], &[]);
    a.incompatible = vec!["b".to_string(), "missing".to_string()];
    let mut b = record("b", &[], &[]);
    b.incompatible = vec!["a".to_string()];
    let mods: ModCollection = vec![a, b].into();

    let graph = GraphBuilder::new(&IgnoreSet::new()).build(&mods);

    assert_eq!(graph.edge_count(), 0);
    assert_eq!(
        graph.incompatibilities(),
        [Incompatibility {
            mod_id: "a".to_string(),
            other_id: "b".to_string(),
        }]
    );
}

#[test]
fn test_incompatibilities_include_non_participants() {
    let ignore: IgnoreSet = ["brrainz.harmony"].into_iter().collect();
    let mut a = record("a", &[], &[]);
    a.incompatible = vec!["brrainz.harmony".to_string(), "flagged".to_string()];
    let mut flagged = record("flagged", &[], &[]);
    flagged.ignored = true;
    let mods: ModCollection = vec![a, record("brrainz.harmony", &[], &[]), flagged].into();

    let graph = GraphBuilder::new(&ignore).build(&mods);

    assert_eq!(graph.nodes(), ["a".to_string()]);
    assert_eq!(
        graph.incompatibilities(),
        [
            Incompatibility {
                mod_id: "a".to_string(),
                other_id: "brrainz.harmony".to_string(),
            },
            Incompatibility {
                mod_id: "a".to_string(),
                other_id: "flagged".to_string(),
            },
        ]
    );
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_tie_break_follows_collection_order() {
    let mods: ModCollection = vec![
        record("z", &[], &[]),
        record("m", &[], &[]),
        record("a", &[], &["z"]),
        record("b", &[], &[]),
    ]
    .into();

    let order = mods.load_order(&IgnoreSet::new()).unwrap();
    assert_eq!(order, vec!["z", "m", "a", "b"]);
}

#[test]
fn test_constraints_override_tie_break() {
    let mods: ModCollection = vec![
        record("ui", &[], &["core", "lib"]),
        record("lib", &[], &[]),
        record("core", &["lib"], &[]),
    ]
    .into();
    let ignore = IgnoreSet::new();

    let order = mods.load_order(&ignore).unwrap();

    assert_eq!(order, vec!["core", "lib", "ui"]);
    assert_respects_edges(&mods, &ignore, &order);
}

#[test]
fn test_resolution_is_deterministic() {
    let mods: ModCollection = vec![
        record("e", &[], &[]),
        record("d", &["a"], &[]),
        record("c", &[], &["e"]),
        record("b", &["c"], &[]),
        record("a", &[], &[]),
    ]
    .into();
    let graph = mods.dependency_graph(&IgnoreSet::new());
    let tie_break: Vec<&str> = mods.package_ids().collect();

    let first = resolve(&graph, &tie_break).unwrap();
    for _ in 0..10 {
        assert_eq!(resolve(&graph, &tie_break).unwrap(), first);
    }
    assert_eq!(first, vec!["e", "d", "b", "c", "a"]);
}

#[test]
fn test_unlisted_nodes_rank_last() {
    let mods: ModCollection = vec![record("a", &[], &[]), record("b", &[], &[]), record("c", &[], &[])].into();
    let graph = mods.dependency_graph(&IgnoreSet::new());

    assert_eq!(resolve(&graph, &["c"]).unwrap(), vec!["c", "a", "b"]);
}

#[test]
fn test_two_node_cycle() {
    let mods: ModCollection = vec![record("A", &["B"], &[]), record("B", &["A"], &[])].into();

    let cycle = mods.load_order(&IgnoreSet::new()).unwrap_err();

    assert_eq!(cycle.members(), ["A".to_string(), "B".to_string()]);
    assert_eq!(cycle.cycles().len(), 1);
}

#[test]
fn test_cycle_report_excludes_downstream_nodes() {
    let mods: ModCollection = vec![
        record("free", &[], &[]),
        record("x", &["y"], &[]),
        record("y", &["z"], &[]),
        record("z", &["x", "tail"], &[]),
        record("tail", &[], &[]),
        record("p", &["q"], &[]),
        record("q", &["p"], &[]),
    ]
    .into();

    let cycle = mods.load_order(&IgnoreSet::new()).unwrap_err();

    assert_eq!(cycle.members(), ["x", "y", "z", "p", "q"].map(String::from));
    assert_eq!(
        cycle.cycles(),
        [
            vec!["x".to_string(), "y".to_string(), "z".to_string()],
            vec!["p".to_string(), "q".to_string()],
        ]
    );
    assert!(!cycle.contains("tail"));
    assert!(!cycle.contains("free"));
}

#[test]
fn test_long_cycle_chain() {
    const LEN: usize = 100_000;
    let ids: Vec<String> = (0..LEN).map(|i| format!("m{i}")).collect();
    let mut mods: ModCollection = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            ModRecord::builder()
                .with_package_id(id.as_str())
                .with_before(vec![ids[(i + 1) % LEN].clone()])
                .build()
        })
        .collect();
    mods.push(record("tail", &[], &["m0"]));

    let cycle = mods.load_order(&IgnoreSet::new()).unwrap_err();

    assert_eq!(cycle.members().len(), LEN);
    assert_eq!(cycle.cycles().len(), 1);
    assert_eq!(cycle.members()[0], "m0");
    assert!(!cycle.contains("tail"));
}

#[test]
fn test_ignore_set_neutrality() {
    let base: Vec<ModRecord> = vec![
        record("a", &["c"], &[]),
        record("b", &[], &[]),
        record("c", &[], &["b"]),
        record("d", &[], &[]),
    ];
    let without: ModCollection = base.clone().into();

    let mut with = base;
    with.insert(2, record("brrainz.harmony", &["a", "b"], &["c", "d"]));
    let with: ModCollection = with.into();

    let ignore: IgnoreSet = ["brrainz.harmony"].into_iter().collect();
    let expected = without.load_order(&ignore).unwrap();
    let actual = with.load_order(&ignore).unwrap();

    assert_eq!(actual, expected);
}

#[test]
fn test_activation_order_puts_ignore_set_first() {
    let mut flagged = record("user.disabled", &[], &[]);
    flagged.ignored = true;
    let mods: ModCollection = vec![
        record("a", &[], &[]),
        record("UnlimitedHugs.HugsLib", &[], &[]),
        flagged,
        record("brrainz.harmony", &[], &[]),
    ]
    .into();
    let ignore: IgnoreSet = ["brrainz.harmony", "UnlimitedHugs.HugsLib"]
        .into_iter()
        .collect();

    let order = mods.activation_order(&ignore).unwrap();

    assert_eq!(order, vec!["UnlimitedHugs.HugsLib", "brrainz.harmony", "a"]);
}
