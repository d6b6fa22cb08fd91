// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Load order resolution.
//!
//! ```text
//! ModCollection --GraphBuilder(IgnoreSet)--> DependencyGraph
//!       |                                          |
//!       +---- insertion order (tie-break) ---> resolve()
//!                                                  |
//!                             Ok(order) | Err(DependencyCycle)
//! ```
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`IgnoreSet`] | Package ids excluded from ordering constraints |
//! | [`GraphBuilder`] | Turns before/after relations into edges |
//! | [`DependencyGraph`] | Directed graph plus incompatibility diagnostics |
//! | [`resolve`] | Deterministic topological sort with cycle reporting |

pub mod graph;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use graph::{DependencyGraph, GraphBuilder, IgnoreSet, Incompatibility};
pub use resolver::resolve;

use crate::error::DependencyCycle;
use crate::model::ModCollection;

impl ModCollection {
    /// Builds the dependency graph for this collection.
    #[must_use]
    pub fn dependency_graph(&self, ignore: &IgnoreSet) -> DependencyGraph {
        GraphBuilder::new(ignore).build(self)
    }

    /// Resolves the order of the collection's graph participants, using
    /// insertion order as the tie-break.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyCycle`] if the declared relations are cyclic.
    pub fn load_order(
        &self,
        ignore: &IgnoreSet,
    ) -> std::result::Result<Vec<String>, DependencyCycle> {
        let graph = self.dependency_graph(ignore);
        let tie_break: Vec<&str> = self.package_ids().collect();
        resolve(&graph, &tie_break)
    }

    /// Full activation order: ignore-set members present in the collection
    /// first (in collection order), then the resolved order. Records flagged
    /// `ignored` are left out.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyCycle`] if the declared relations are cyclic.
    pub fn activation_order(
        &self,
        ignore: &IgnoreSet,
    ) -> std::result::Result<Vec<String>, DependencyCycle> {
        let resolved = self.load_order(ignore)?;

        let mut order: Vec<String> = Vec::with_capacity(resolved.len() + ignore.len());
        for record in self.iter() {
            if !record.ignored
                && ignore.contains(&record.package_id)
                && !order.contains(&record.package_id)
            {
                order.push(record.package_id.clone());
            }
        }
        order.extend(resolved);
        Ok(order)
    }
}
