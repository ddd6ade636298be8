//! Canonical in-memory catalog of course records.
//!
//! The store keeps two structures in lockstep:
//! - a hash map for key lookups
//! - a sorted key index so listings never re-sort

use crate::record::CourseRecord;
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashMap};

pub const CATALOG_SNAPSHOT_REF_PREFIX: &str = "catalog:sha256:";

/// Errors raised while mutating the catalog store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate course key: {0}")]
    DuplicateKey(String),
}

/// Key → record mapping plus an always-sorted key index.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: HashMap<String, CourseRecord>,
    ordered: BTreeSet<String>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record whose key is not yet present.
    ///
    /// A second insert of the same key is rejected and the stored record is
    /// left untouched (first write wins).
    pub fn insert(&mut self, record: CourseRecord) -> Result<(), StoreError> {
        if self.records.contains_key(&record.key) {
            return Err(StoreError::DuplicateKey(record.key));
        }
        self.ordered.insert(record.key.clone());
        self.records.insert(record.key.clone(), record);
        Ok(())
    }

    /// Drop every record and the ordered index together.
    pub fn clear(&mut self) {
        self.records.clear();
        self.ordered.clear();
    }

    /// Lookup one record by canonical key.
    pub fn get(&self, key: &str) -> Option<&CourseRecord> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Keys in ascending order, read straight from the maintained index.
    ///
    /// The returned iterator is `Clone`, so callers can restart it without
    /// asking the store again.
    pub fn ordered_keys(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.ordered.iter().map(String::as_str)
    }

    /// Records in ascending key order.
    pub fn ordered_records(&self) -> impl Iterator<Item = &CourseRecord> + '_ {
        self.ordered_keys().filter_map(|key| self.records.get(key))
    }

    /// Keys in hash-map order (unspecified). Used by the resort baseline.
    pub fn keys_unordered(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Content-addressed reference for the current catalog state.
    ///
    /// Two stores holding the same records produce the same reference,
    /// regardless of insertion order.
    pub fn snapshot_ref(&self) -> String {
        let mut hasher = Sha256::new();
        for record in self.ordered_records() {
            record.digest_into(&mut hasher);
        }
        format!("{CATALOG_SNAPSHOT_REF_PREFIX}{:x}", hasher.finalize())
    }
}
