//! Direct-prerequisite adjacency built from a catalog store.

use crate::store::CatalogStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A prerequisite reference naming a course that is not in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingReference {
    pub course: String,
    pub missing: String,
}

/// Adjacency list: course key → direct prerequisite keys in declared order.
///
/// Every stored key has an entry, possibly empty. Keys that only appear as
/// prerequisites have no entry and behave as leaves.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    adjacency: HashMap<String, Vec<String>>,
    edge_count: usize,
}

impl DependencyGraph {
    /// Derive the adjacency list from the store in a single pass.
    ///
    /// Declared order and duplicates within one record are kept as-is.
    /// Prerequisites are not checked against the store.
    pub fn build(store: &CatalogStore) -> Self {
        let mut adjacency: HashMap<String, Vec<String>> = HashMap::with_capacity(store.len());
        let mut edge_count = 0;

        for record in store.ordered_records() {
            let entry = adjacency.entry(record.key.clone()).or_default();
            for prereq in &record.prerequisites {
                entry.push(prereq.clone());
                edge_count += 1;
            }
        }

        tracing::debug!(
            courses = adjacency.len(),
            edges = edge_count,
            "built prerequisite graph"
        );

        Self {
            adjacency,
            edge_count,
        }
    }

    /// Direct prerequisites of `key`; empty for unknown keys.
    pub fn direct(&self, key: &str) -> &[String] {
        self.adjacency.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `key` has an adjacency entry (i.e. was in the store).
    pub fn contains(&self, key: &str) -> bool {
        self.adjacency.contains_key(key)
    }

    /// Number of keys with an adjacency entry.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Total number of declared prerequisite edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Prerequisite references to keys without an adjacency entry, in
    /// course-key order then declared order.
    pub fn dangling_references(&self, store: &CatalogStore) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        for key in store.ordered_keys() {
            for prereq in self.direct(key) {
                if !self.contains(prereq) {
                    dangling.push(DanglingReference {
                        course: key.to_string(),
                        missing: prereq.clone(),
                    });
                }
            }
        }
        dangling
    }
}
