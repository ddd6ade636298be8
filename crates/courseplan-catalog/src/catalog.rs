//! Catalog facade: store, prerequisite graph and closure memo, loaded and
//! invalidated together.
//!
//! ```text
//! CSV ──load──▶ CatalogStore ──build──▶ DependencyGraph
//!                                            │
//!                         expand_closure ◀───┴──▶ ClosureMemo
//! ```

use crate::closure::{ClosureMemo, ClosureResolver, CycleDetected};
use crate::graph::{DanglingReference, DependencyGraph};
use crate::loader::{LoadError, LoadWarning, read_records_from_path};
use crate::record::{CourseRecord, normalize_key};
use crate::store::{CatalogStore, StoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// When the closure memo is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemoPolicy {
    /// Keep closures across queries; clear only when new data is loaded.
    #[default]
    PerLoad,
    /// Clear before every top-level closure query.
    PerQuery,
}

impl MemoPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoPolicy::PerLoad => "per-load",
            MemoPolicy::PerQuery => "per-query",
        }
    }
}

impl FromStr for MemoPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-load" => Ok(MemoPolicy::PerLoad),
            "per-query" => Ok(MemoPolicy::PerQuery),
            other => Err(format!(
                "unknown memo policy `{other}` (expected `per-load` or `per-query`)"
            )),
        }
    }
}

/// Errors raised while replacing the catalog contents.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("no valid courses were loaded from {0}")]
    NoCoursesLoaded(String),
}

/// What one load did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
    pub dangling: Vec<DanglingReference>,
    pub warnings: Vec<LoadWarning>,
    pub snapshot_ref: String,
}

/// One course with its direct prerequisites and full closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetail {
    pub record: CourseRecord,
    pub closure: Result<Vec<String>, CycleDetected>,
}

impl CourseDetail {
    pub fn direct(&self) -> &[String] {
        &self.record.prerequisites
    }
}

/// Store, graph and memo with a shared lifecycle.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    store: CatalogStore,
    graph: DependencyGraph,
    memo: ClosureMemo,
    policy: MemoPolicy,
}

impl Catalog {
    pub fn new(policy: MemoPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn memo(&self) -> &ClosureMemo {
        &self.memo
    }

    pub fn is_loaded(&self) -> bool {
        !self.store.is_empty()
    }

    /// Replace the whole catalog with `records` and rebuild the graph.
    ///
    /// Records whose key is already present are skipped (first wins).
    pub fn load_records(&mut self, records: Vec<CourseRecord>) -> LoadSummary {
        self.store.clear();
        self.memo.clear();

        let mut loaded = 0;
        let mut skipped = 0;
        for record in records {
            match self.store.insert(record) {
                Ok(()) => loaded += 1,
                Err(StoreError::DuplicateKey(key)) => {
                    tracing::warn!(course = %key, "duplicate course key; keeping the first");
                    skipped += 1;
                }
            }
        }

        self.graph = DependencyGraph::build(&self.store);
        let dangling = self.graph.dangling_references(&self.store);
        if !dangling.is_empty() {
            tracing::warn!(
                count = dangling.len(),
                "prerequisite reference(s) do not match a loaded course"
            );
        }

        let summary = LoadSummary {
            loaded,
            skipped,
            dangling,
            warnings: Vec::new(),
            snapshot_ref: self.store.snapshot_ref(),
        };
        tracing::info!(
            loaded = summary.loaded,
            skipped = summary.skipped,
            snapshot = %summary.snapshot_ref,
            "catalog loaded"
        );
        summary
    }

    /// Read a CSV file and replace the catalog with its contents.
    ///
    /// The current catalog is kept if the file cannot be read or yields no
    /// valid course.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<LoadSummary, CatalogError> {
        let path = path.as_ref();
        let outcome = read_records_from_path(path)?;
        if outcome.records.is_empty() {
            return Err(CatalogError::NoCoursesLoaded(path.display().to_string()));
        }

        let skipped = outcome.skipped();
        let mut summary = self.load_records(outcome.records);
        summary.skipped += skipped;
        summary.warnings = outcome.warnings;
        Ok(summary)
    }

    /// Transitive prerequisites of a canonical key.
    pub fn expand_closure(&mut self, key: &str) -> Result<Vec<String>, CycleDetected> {
        if self.policy == MemoPolicy::PerQuery {
            self.memo.clear();
        }
        ClosureResolver::new(&self.graph, &mut self.memo).expand(key)
    }

    /// Look up a course by user-typed key and resolve its closure.
    ///
    /// Returns `None` when no course has that key.
    pub fn course_detail(&mut self, raw_key: &str) -> Option<CourseDetail> {
        let key = normalize_key(raw_key);
        let record = self.store.get(&key)?.clone();
        let closure = self.expand_closure(&key);
        Some(CourseDetail { record, closure })
    }

    /// Records in ascending key order.
    pub fn ordered_records(&self) -> impl Iterator<Item = &CourseRecord> + '_ {
        self.store.ordered_records()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn record(key: &str, prereqs: &[&str]) -> CourseRecord {
        CourseRecord::new(key, &format!("Course {key}"), prereqs)
    }

    fn temp_csv(prefix: &str, contents: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "courseplan-catalog-{prefix}-{}-{unique}.csv",
            std::process::id()
        ));
        fs::write(&path, contents).expect("fixture should write");
        path
    }

    #[test]
    fn reload_replaces_every_structure() {
        let mut catalog = Catalog::new(MemoPolicy::PerLoad);
        catalog.load_records(vec![record("A", &["B"]), record("B", &[])]);
        catalog.expand_closure("A").expect("acyclic");
        assert!(catalog.memo().contains("A"));

        catalog.load_records(vec![record("C", &["A"])]);
        assert!(catalog.store().get("A").is_none());
        assert!(!catalog.graph().contains("A"));
        assert!(catalog.memo().is_empty());
        assert_eq!(catalog.store().ordered_keys().collect::<Vec<_>>(), vec!["C"]);
        assert_eq!(
            catalog.expand_closure("C").expect("A is now a leaf"),
            vec!["A".to_string()]
        );
    }

    #[test]
    fn per_load_policy_reuses_closures_across_queries() {
        let mut catalog = Catalog::new(MemoPolicy::PerLoad);
        catalog.load_records(vec![record("A", &["B"]), record("B", &["C"])]);

        let first = catalog.expand_closure("A").expect("acyclic");
        let traversed = catalog.memo().expansions();
        let second = catalog.expand_closure("A").expect("acyclic");

        assert_eq!(first, second);
        assert_eq!(catalog.memo().expansions(), traversed);
    }

    #[test]
    fn per_query_policy_clears_before_each_query() {
        let mut catalog = Catalog::new(MemoPolicy::PerQuery);
        catalog.load_records(vec![record("A", &["B"]), record("B", &[])]);

        catalog.expand_closure("A").expect("acyclic");
        let after_first = catalog.memo().expansions();
        let second = catalog.expand_closure("A").expect("acyclic");

        assert_eq!(second, vec!["B".to_string()]);
        assert_eq!(catalog.memo().expansions(), after_first * 2);
        assert_eq!(catalog.memo().len(), 2);
    }

    #[test]
    fn load_records_skips_duplicate_keys() {
        let mut catalog = Catalog::default();
        let summary = catalog.load_records(vec![
            CourseRecord::new("A", "First", Vec::<String>::new()),
            CourseRecord::new("A", "Second", Vec::<String>::new()),
        ]);

        assert_eq!(summary.loaded, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(catalog.store().get("A").map(|r| r.title.as_str()), Some("First"));
    }

    #[test]
    fn course_detail_normalizes_input_and_keeps_cycles_local() {
        let mut catalog = Catalog::default();
        catalog.load_records(vec![
            record("X", &["Y"]),
            record("Y", &["X"]),
            record("P", &["Q"]),
        ]);

        let detail = catalog.course_detail("  x ").expect("X exists");
        assert_eq!(detail.direct(), ["Y".to_string()]);
        assert_eq!(
            detail.closure,
            Err(CycleDetected {
                key: "X".to_string()
            })
        );

        let detail = catalog.course_detail("p").expect("P exists");
        assert_eq!(detail.closure, Ok(vec!["Q".to_string()]));
        assert!(catalog.course_detail("Q").is_none());
    }

    #[test]
    fn load_path_reports_warnings_and_dangling_references() {
        let path = temp_csv(
            "summary",
            "CSCI200,Data Structures,CSCI101,MATH999\nCSCI101,Intro\nCSCI101,Again\nbroken\n",
        );
        let mut catalog = Catalog::default();
        let summary = catalog.load_path(&path).expect("load should succeed");

        assert_eq!(summary.loaded, 2);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.warnings.len(), 2);
        assert_eq!(
            summary.dangling,
            vec![DanglingReference {
                course: "CSCI200".to_string(),
                missing: "MATH999".to_string(),
            }]
        );
        assert_eq!(summary.snapshot_ref, catalog.store().snapshot_ref());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn failed_load_keeps_previous_catalog() {
        let mut catalog = Catalog::default();
        catalog.load_records(vec![record("A", &[])]);

        let empty = temp_csv("empty", "\nnot-a-course\n");
        let err = catalog.load_path(&empty).expect_err("no valid rows");
        assert!(matches!(err, CatalogError::NoCoursesLoaded(_)));
        assert!(catalog.store().contains("A"));

        let missing = empty.with_extension("missing");
        assert!(matches!(
            catalog.load_path(&missing),
            Err(CatalogError::Load(LoadError::Open(_)))
        ));
        assert!(catalog.is_loaded());

        let _ = fs::remove_file(empty);
    }

    #[test]
    fn memo_policy_parses_from_config_strings() {
        assert_eq!("per-load".parse::<MemoPolicy>(), Ok(MemoPolicy::PerLoad));
        assert_eq!("per-query".parse::<MemoPolicy>(), Ok(MemoPolicy::PerQuery));
        assert!("always".parse::<MemoPolicy>().is_err());
    }
}
