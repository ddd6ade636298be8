//! Integration tests: load the CSV fixtures and query the engine end to end.
//!
//! Each fixture in tests/fixtures/ is a catalog file exercising one shape:
//! - catalog.csv: a clean acyclic catalog
//! - messy.csv: casing, whitespace, duplicates and malformed lines
//! - cyclic.csv: a two-course prerequisite loop reachable from other courses

use courseplan_catalog::{Catalog, CycleDetected, LoadWarningKind, MemoPolicy, check_catalog};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load(name: &str) -> Catalog {
    let mut catalog = Catalog::new(MemoPolicy::PerLoad);
    catalog
        .load_path(fixture(name))
        .unwrap_or_else(|e| panic!("failed to load {name}: {e}"));
    catalog
}

fn keys(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|k| k.to_string()).collect()
}

#[test]
fn listing_is_sorted_regardless_of_file_order() {
    let catalog = load("catalog.csv");
    let listed: Vec<&str> = catalog.store().ordered_keys().collect();
    assert_eq!(
        listed,
        vec![
            "CSCI100", "CSCI101", "CSCI200", "CSCI300", "CSCI301", "CSCI350", "CSCI400",
            "MATH201",
        ]
    );
}

#[test]
fn full_chain_merges_subtrees_in_first_encounter_order() {
    let mut catalog = load("catalog.csv");
    let chain = catalog.expand_closure("CSCI400").expect("catalog is acyclic");
    assert_eq!(
        chain,
        keys(&[
            "CSCI301", "CSCI101", "CSCI100", "CSCI350", "CSCI300", "CSCI200", "MATH201",
        ])
    );

    let traversed = catalog.memo().expansions();
    let again = catalog.expand_closure("CSCI300").expect("memoized");
    assert_eq!(again, keys(&["CSCI200", "CSCI101", "CSCI100", "MATH201"]));
    assert_eq!(catalog.memo().expansions(), traversed);
}

#[test]
fn messy_input_is_normalized_and_reported() {
    let catalog = load("messy.csv");
    let summary_keys: Vec<&str> = catalog.store().ordered_keys().collect();
    assert_eq!(summary_keys, vec!["CSCI101", "CSCI301", "CSCI350", "CSCI400"]);

    let top = catalog.store().get("CSCI400").expect("normalized key");
    assert_eq!(top.title, "Large Software Development");
    assert_eq!(top.prerequisites, keys(&["CSCI301", "CSCI350"]));
    assert_eq!(
        catalog.store().get("CSCI101").map(|r| r.title.as_str()),
        Some("Introduction to Programming in C++")
    );

    let mut reloaded = Catalog::default();
    let summary = reloaded
        .load_path(fixture("messy.csv"))
        .expect("messy fixture still has valid rows");
    let kinds: Vec<(usize, LoadWarningKind)> =
        summary.warnings.iter().map(|w| (w.line, w.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            (6, LoadWarningKind::DuplicateKey),
            (7, LoadWarningKind::MissingField),
            (8, LoadWarningKind::EmptyField),
        ]
    );
    assert_eq!(summary.loaded, 4);
    assert_eq!(summary.skipped, 3);
    let missing: Vec<&str> = summary.dangling.iter().map(|d| d.missing.as_str()).collect();
    assert_eq!(missing, vec!["CSCI100", "CSCI300"]);
}

#[test]
fn cycle_fails_only_the_queries_that_reach_it() {
    let mut catalog = load("cyclic.csv");

    assert_eq!(
        catalog.expand_closure("PHYS101"),
        Err(CycleDetected {
            key: "MATH150".to_string()
        })
    );
    assert_eq!(catalog.expand_closure("CHEM101"), Ok(Vec::new()));
    assert!(catalog.expand_closure("BIOL101").is_err());

    let detail = catalog.course_detail("chem101").expect("course exists");
    assert_eq!(detail.closure, Ok(Vec::new()));

    let report = check_catalog(&mut catalog);
    let failing: Vec<&str> = report.errors.iter().map(|f| f.course.as_str()).collect();
    assert_eq!(failing, vec!["BIOL101", "MATH140", "MATH150", "PHYS101"]);
}

#[test]
fn loading_a_second_file_replaces_the_first() {
    let mut catalog = load("catalog.csv");
    catalog.expand_closure("CSCI400").expect("acyclic");
    let first_ref = catalog.store().snapshot_ref();

    catalog
        .load_path(fixture("cyclic.csv"))
        .expect("second load should succeed");

    assert!(catalog.store().get("CSCI400").is_none());
    assert!(catalog.memo().is_empty());
    assert!(catalog.graph().direct("CSCI400").is_empty());
    assert_ne!(catalog.store().snapshot_ref(), first_ref);
    assert_eq!(catalog.store().len(), 5);
}
