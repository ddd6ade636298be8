//! # courseplan-catalog
//!
//! Course catalog and prerequisite engine.
//!
//! This crate provides:
//! - `CourseRecord` and key normalization
//! - CSV ingestion with line-level validation
//! - `CatalogStore` (key lookup plus an always-sorted key index)
//! - `DependencyGraph` (direct-prerequisite adjacency)
//! - `ClosureResolver` (memoized, cycle-guarded transitive closure)
//! - `Catalog`, which loads and invalidates all of the above together
//!
//! It does no presentation. Rendering, menus and timing live in
//! `courseplan-cli`.
//!
//! ## Data flow
//!
//! ```text
//! CSV (one course per line)
//!     │  read_records
//! CatalogStore ── build ──▶ DependencyGraph ── expand ──▶ ClosureMemo
//! ```

pub mod catalog;
pub mod check;
pub mod closure;
pub mod graph;
pub mod loader;
pub mod record;
pub mod store;

pub use catalog::{Catalog, CatalogError, CourseDetail, LoadSummary, MemoPolicy};
pub use check::{
    CATALOG_CHECK_KIND, CatalogCheckReport, CatalogCheckSummary, CatalogFinding,
    FAILURE_CLASS_PREREQUISITE_CYCLE, WARNING_CLASS_PREREQUISITE_DANGLING, check_catalog,
};
pub use closure::{ClosureMemo, ClosureResolver, CycleDetected};
pub use graph::{DanglingReference, DependencyGraph};
pub use loader::{
    LoadError, LoadOutcome, LoadWarning, LoadWarningKind, read_records, read_records_from_path,
};
pub use record::{CourseRecord, normalize_key};
pub use store::{CATALOG_SNAPSHOT_REF_PREFIX, CatalogStore, StoreError};
