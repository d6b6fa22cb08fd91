// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dependency graph construction.
//!
//! ```text
//! m.before = [b]   -->   m --> b
//! m.after  = [a]   -->   a --> m
//!
//! dropped: unknown ids, self references, ignore-set endpoints,
//!          records flagged `ignored`, stubs (no package id)
//! ```

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::model::{ModCollection, ModRecord};

/// Package ids that float unconstrained in the graph.
///
/// Typically shared libraries that are always loaded first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreSet(BTreeSet<String>);

impl IgnoreSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, package_id: impl Into<String>) {
        self.0.insert(package_id.into());
    }

    #[must_use]
    pub fn contains(&self, package_id: &str) -> bool {
        self.0.contains(package_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Two mods that declare each other (or one the other) incompatible.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Incompatibility {
    pub mod_id: String,
    pub other_id: String,
}

/// Directed "loads before" graph over package ids.
///
/// Nodes keep the order in which they first appear in the collection.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    successors: Vec<BTreeSet<usize>>,
    incompatibilities: Vec<Incompatibility>,
}

impl DependencyGraph {
    /// Node ids in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn contains(&self, package_id: &str) -> bool {
        self.index.contains_key(package_id)
    }

    /// All edges `(from, to)`, meaning `from` loads before `to`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.successors.iter().enumerate().flat_map(move |(from, tos)| {
            tos.iter()
                .map(move |&to| (self.nodes[from].as_str(), self.nodes[to].as_str()))
        })
    }

    /// Ids that must load after `package_id`.
    pub fn successors(&self, package_id: &str) -> impl Iterator<Item = &str> {
        self.index
            .get(package_id)
            .into_iter()
            .flat_map(move |&i| {
                self.successors[i]
                    .iter()
                    .map(move |&j| self.nodes[j].as_str())
            })
    }

    #[must_use]
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&f), Some(&t)) => self.successors[f].contains(&t),
            _ => false,
        }
    }

    /// Incompatible pairs where both sides are in the collection, including
    /// ignored records and ignore-set members.
    #[must_use]
    pub fn incompatibilities(&self) -> &[Incompatibility] {
        &self.incompatibilities
    }

    pub(crate) fn index_of(&self, package_id: &str) -> Option<usize> {
        self.index.get(package_id).copied()
    }

    pub(crate) fn successor_indices(&self, node: usize) -> &BTreeSet<usize> {
        &self.successors[node]
    }

    fn add_node(&mut self, package_id: &str) {
        if !self.index.contains_key(package_id) {
            self.index.insert(package_id.to_string(), self.nodes.len());
            self.nodes.push(package_id.to_string());
            self.successors.push(BTreeSet::new());
        }
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        self.successors[from].insert(to);
    }
}

/// Builds a [`DependencyGraph`] from a collection.
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder<'a> {
    ignore: &'a IgnoreSet,
}

impl<'a> GraphBuilder<'a> {
    #[must_use]
    pub const fn new(ignore: &'a IgnoreSet) -> Self {
        Self { ignore }
    }

    /// Whether `record` becomes a graph node.
    #[must_use]
    pub fn is_participant(&self, record: &ModRecord) -> bool {
        !record.is_stub() && !record.ignored && !self.ignore.contains(&record.package_id)
    }

    /// Builds the graph restricted to the collection's participants.
    #[must_use]
    pub fn build(&self, mods: &ModCollection) -> DependencyGraph {
        let mut graph = DependencyGraph::default();

        for record in mods.iter().filter(|m| self.is_participant(m)) {
            graph.add_node(&record.package_id);
        }

        let mut dropped = 0usize;

        for record in mods.iter().filter(|m| self.is_participant(m)) {
            let Some(this) = graph.index_of(&record.package_id) else {
                continue;
            };

            for before in &record.before {
                match self.endpoint(&graph, record, before) {
                    Some(other) => graph.add_edge(this, other),
                    None => dropped += 1,
                }
            }

            for after in &record.after {
                match self.endpoint(&graph, record, after) {
                    Some(other) => graph.add_edge(other, this),
                    None => dropped += 1,
                }
            }

        }

        graph.incompatibilities = Self::incompatibilities(mods);

        debug!(
            collection = mods.name().unwrap_or("unnamed"),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dropped,
            incompatible = graph.incompatibilities.len(),
            "Built dependency graph"
        );

        graph
    }

    /// Incompatible pairs among all installed records, participants or not.
    fn incompatibilities(mods: &ModCollection) -> Vec<Incompatibility> {
        let present: BTreeSet<&str> = mods.package_ids().collect();
        let mut pairs = BTreeSet::new();

        for record in mods.iter().filter(|m| !m.is_stub()) {
            for other in &record.incompatible {
                if *other == record.package_id || !present.contains(other.as_str()) {
                    continue;
                }
                let (a, b) = if record.package_id < *other {
                    (record.package_id.clone(), other.clone())
                } else {
                    (other.clone(), record.package_id.clone())
                };
                pairs.insert(Incompatibility {
                    mod_id: a,
                    other_id: b,
                });
            }
        }

        pairs.into_iter().collect()
    }

    /// Resolves the other end of a declared relation, if it yields an edge.
    fn endpoint(&self, graph: &DependencyGraph, record: &ModRecord, other: &str) -> Option<usize> {
        if other == record.package_id {
            trace!(package_id = %other, "Dropping self reference");
            return None;
        }
        if self.ignore.contains(other) {
            trace!(from = %record.package_id, to = %other, "Dropping edge to ignored mod");
            return None;
        }
        let index = graph.index_of(other);
        if index.is_none() {
            trace!(from = %record.package_id, to = %other, "Dropping reference to absent mod");
        }
        index
    }
}
