//! Transitive prerequisite closure: memoized depth-first expansion with
//! path-sensitive cycle detection.
//!
//! The traversal runs on an explicit frame stack rather than native
//! recursion, so chain depth is bounded by heap, not by the thread stack.
//! Semantics match the recursive formulation exactly:
//!
//! ```text
//! expand(k):
//!   memo[k] present        -> memo[k]
//!   k on active path       -> CycleDetected(k)
//!   otherwise              -> for p in direct(k): out += [p] ++ expand(p)
//!                             pop k; memo[k] = stable_dedup(out)
//! ```

use crate::graph::DependencyGraph;
use std::collections::{HashMap, HashSet};

/// A key reappeared on its own active descent path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cycle detected involving course: {key}")]
pub struct CycleDetected {
    pub key: String,
}

/// Cache of computed closures, keyed by course key.
///
/// Entries are immutable once written; the only way to drop one is
/// [`ClosureMemo::clear`].
#[derive(Debug, Clone, Default)]
pub struct ClosureMemo {
    entries: HashMap<String, Vec<String>>,
    expansions: usize,
}

impl ClosureMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys actually traversed (memo misses) over this memo's
    /// lifetime. Not reset by [`ClosureMemo::clear`].
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

struct Frame<'g> {
    key: String,
    prereqs: &'g [String],
    next: usize,
    collected: Vec<String>,
}

impl<'g> Frame<'g> {
    fn open(graph: &'g DependencyGraph, key: String) -> Self {
        let prereqs = graph.direct(&key);
        Self {
            key,
            prereqs,
            next: 0,
            collected: Vec::new(),
        }
    }
}

/// Expands closures over one graph, reading and filling one memo.
pub struct ClosureResolver<'a> {
    graph: &'a DependencyGraph,
    memo: &'a mut ClosureMemo,
}

impl<'a> ClosureResolver<'a> {
    pub fn new(graph: &'a DependencyGraph, memo: &'a mut ClosureMemo) -> Self {
        Self { graph, memo }
    }

    /// Every key reachable from `key` by one or more prerequisite edges,
    /// deduplicated in first-encounter order.
    ///
    /// Unknown keys expand to an empty closure. On a cycle the query fails
    /// with the key whose re-entry closed it; closures finished before the
    /// failure stay memoized.
    pub fn expand(&mut self, key: &str) -> Result<Vec<String>, CycleDetected> {
        if let Some(hit) = self.memo.get(key) {
            return Ok(hit.to_vec());
        }

        let graph = self.graph;
        let mut visiting: HashSet<String> = HashSet::new();
        let mut stack: Vec<Frame<'_>> = Vec::new();

        visiting.insert(key.to_string());
        stack.push(Frame::open(graph, key.to_string()));

        loop {
            let Some(top) = stack.last_mut() else {
                // The root frame always returns before the stack empties.
                return Ok(Vec::new());
            };

            let prereqs = top.prereqs;
            if top.next < prereqs.len() {
                let prereq = &prereqs[top.next];
                top.next += 1;
                top.collected.push(prereq.clone());

                if let Some(hit) = self.memo.get(prereq) {
                    top.collected.extend(hit.iter().cloned());
                    continue;
                }
                if visiting.contains(prereq.as_str()) {
                    tracing::debug!(course = %key, reentered = %prereq, "prerequisite cycle");
                    return Err(CycleDetected {
                        key: prereq.clone(),
                    });
                }

                visiting.insert(prereq.clone());
                stack.push(Frame::open(graph, prereq.clone()));
                continue;
            }

            let Some(done) = stack.pop() else {
                return Ok(Vec::new());
            };
            visiting.remove(&done.key);
            let closure = stable_dedup(done.collected);
            self.memo.expansions += 1;
            self.memo.entries.insert(done.key, closure.clone());

            match stack.last_mut() {
                Some(parent) => parent.collected.extend(closure),
                None => return Ok(closure),
            }
        }
    }
}

/// Drop repeats, keeping each key at its first position.
fn stable_dedup(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(keys.len());
    keys.into_iter()
        .filter(|key| seen.insert(key.clone()))
        .collect()
}
