// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deterministic topological sort.
//!
//! ```text
//! rank(node) = position in tie-break order (unlisted: after all listed,
//!              in graph order)
//!
//! Kahn:  ready = min-heap by rank of nodes with in-degree 0
//!        pop -> emit -> decrement successors -> push newly ready
//!
//! stalled?  --> Tarjan SCC over the unemitted nodes
//!               components with > 1 node are cycles
//! ```

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, btree_set};

use tracing::debug;

use super::graph::DependencyGraph;
use crate::error::DependencyCycle;

/// Topologically sorts `graph`, breaking ties by `tie_break` order.
///
/// Never mutates its inputs and always returns the same order for the same
/// inputs.
///
/// # Errors
///
/// Returns [`DependencyCycle`] naming every node that takes part in a cycle.
pub fn resolve<S: AsRef<str>>(
    graph: &DependencyGraph,
    tie_break: &[S],
) -> std::result::Result<Vec<String>, DependencyCycle> {
    let ranks = ranks(graph, tie_break);
    let count = graph.node_count();

    let mut in_degree = vec![0usize; count];
    for node in 0..count {
        for &succ in graph.successor_indices(node) {
            in_degree[succ] += 1;
        }
    }

    let mut ready: BinaryHeap<Reverse<(usize, usize)>> = (0..count)
        .filter(|&n| in_degree[n] == 0)
        .map(|n| Reverse((ranks[n], n)))
        .collect();

    let mut order = Vec::with_capacity(count);
    let mut emitted = vec![false; count];

    while let Some(Reverse((_, node))) = ready.pop() {
        emitted[node] = true;
        order.push(graph.nodes()[node].clone());

        for &succ in graph.successor_indices(node) {
            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                ready.push(Reverse((ranks[succ], succ)));
            }
        }
    }

    if order.len() == count {
        debug!(mods = count, "Resolved load order");
        return Ok(order);
    }

    Err(cycle_report(graph, &emitted, &ranks))
}

/// Rank of each node: tie-break position, or after every listed id.
fn ranks<S: AsRef<str>>(graph: &DependencyGraph, tie_break: &[S]) -> Vec<usize> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(tie_break.len());
    for (position, id) in tie_break.iter().enumerate() {
        positions.entry(id.as_ref()).or_insert(position);
    }

    graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, id)| {
            positions
                .get(id.as_str())
                .copied()
                .unwrap_or(tie_break.len() + i)
        })
        .collect()
}

/// Collects the strongly connected components left behind by Kahn.
fn cycle_report(graph: &DependencyGraph, emitted: &[bool], ranks: &[usize]) -> DependencyCycle {
    let mut tarjan = Tarjan::new(graph, emitted);
    for node in 0..graph.node_count() {
        if !emitted[node] && tarjan.index[node].is_none() {
            tarjan.visit(node);
        }
    }

    let mut components: Vec<Vec<usize>> = tarjan
        .components
        .into_iter()
        .filter(|c| c.len() > 1)
        .collect();

    for component in &mut components {
        component.sort_by_key(|&n| ranks[n]);
    }
    components.sort_by_key(|c| ranks[c[0]]);

    let mut members: Vec<usize> = components.iter().flatten().copied().collect();
    members.sort_by_key(|&n| ranks[n]);

    let name = |n: usize| graph.nodes()[n].clone();
    let cycles: Vec<Vec<String>> = components
        .iter()
        .map(|c| c.iter().copied().map(name).collect())
        .collect();
    let members: Vec<String> = members.into_iter().map(name).collect();

    debug!(members = ?members, "Dependency cycle detected");
    DependencyCycle::new(members, cycles)
}

/// Tarjan's strongly connected components over the unemitted subgraph.
struct Tarjan<'a> {
    graph: &'a DependencyGraph,
    emitted: &'a [bool],
    next_index: usize,
    index: Vec<Option<usize>>,
    low_link: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    components: Vec<Vec<usize>>,
}

impl<'a> Tarjan<'a> {
    fn new(graph: &'a DependencyGraph, emitted: &'a [bool]) -> Self {
        let count = graph.node_count();
        Self {
            graph,
            emitted,
            next_index: 0,
            index: vec![None; count],
            low_link: vec![0; count],
            on_stack: vec![false; count],
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn open(&mut self, node: usize) {
        self.index[node] = Some(self.next_index);
        self.low_link[node] = self.next_index;
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack[node] = true;
    }

    /// Depth-first search from `root` on an explicit work stack, so long
    /// chains do not grow the call stack.
    fn visit(&mut self, root: usize) {
        let graph = self.graph;
        let mut work: Vec<(usize, btree_set::Iter<'a, usize>)> = Vec::new();

        self.open(root);
        work.push((root, graph.successor_indices(root).iter()));

        while let Some((node, successors)) = work.last_mut() {
            let node = *node;

            if let Some(&succ) = successors.next() {
                // emitted nodes cannot be on a cycle
                if self.emitted[succ] {
                    continue;
                }
                match self.index[succ] {
                    None => {
                        self.open(succ);
                        work.push((succ, graph.successor_indices(succ).iter()));
                    }
                    Some(succ_index) if self.on_stack[succ] => {
                        self.low_link[node] = self.low_link[node].min(succ_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            work.pop();
            if let Some(&(parent, _)) = work.last() {
                self.low_link[parent] = self.low_link[parent].min(self.low_link[node]);
            }

            if Some(self.low_link[node]) == self.index[node] {
                let mut component = Vec::new();
                while let Some(member) = self.stack.pop() {
                    self.on_stack[member] = false;
                    component.push(member);
                    if member == node {
                        break;
                    }
                }
                self.components.push(component);
            }
        }
    }
}
