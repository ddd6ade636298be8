//! Load-time and listing-strategy timing.
//!
//! Compares iterating the store's maintained key index against collecting
//! and sorting the keys on every pass. Both paths touch each record's title
//! so they do comparable work; `black_box` keeps the loops from being
//! optimized away.

use crate::config::Config;
use crate::support::{print_json, resorted_records, write_stdout_or_exit};
use courseplan_catalog::{Catalog, CatalogError, CatalogStore};
use serde::Serialize;
use std::hint::black_box;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

const RULE_WIDTH: usize = 52;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchReport {
    pub catalog_path: String,
    pub course_count: usize,
    pub load_us: u128,
    pub iterations: usize,
    pub ordered_us: u128,
    pub resort_us: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
}

/// Reload `catalog` from `path`, then time both listing strategies.
pub fn measure(
    catalog: &mut Catalog,
    path: &Path,
    iterations: usize,
) -> Result<BenchReport, CatalogError> {
    let started = Instant::now();
    catalog.load_path(path)?;
    let load_us = started.elapsed().as_micros();

    let store = catalog.store();
    // Warm-up pass for each strategy.
    black_box(iterate_ordered(store));
    black_box(iterate_resorted(store));

    let ordered_us = time_iterations(iterations, || iterate_ordered(store));
    let resort_us = time_iterations(iterations, || iterate_resorted(store));
    let ratio = (ordered_us > 0).then(|| resort_us as f64 / ordered_us as f64);

    tracing::debug!(
        iterations,
        ordered_us = %ordered_us,
        resort_us = %resort_us,
        "bench complete"
    );

    Ok(BenchReport {
        catalog_path: path.display().to_string(),
        course_count: store.len(),
        load_us,
        iterations,
        ordered_us,
        resort_us,
        ratio,
    })
}

fn iterate_ordered(store: &CatalogStore) -> u64 {
    store
        .ordered_records()
        .map(|record| record.title.len() as u64)
        .sum()
}

fn iterate_resorted(store: &CatalogStore) -> u64 {
    resorted_records(store)
        .into_iter()
        .map(|record| record.title.len() as u64)
        .sum()
}

fn time_iterations(iterations: usize, pass: impl Fn() -> u64) -> u128 {
    let started = Instant::now();
    let mut checksum: u64 = 0;
    for _ in 0..iterations {
        checksum = checksum.wrapping_add(black_box(pass()));
    }
    black_box(checksum);
    started.elapsed().as_micros()
}

pub fn write_report(out: &mut impl Write, report: &BenchReport) -> io::Result<()> {
    let title = " PERFORMANCE RESULTS ";
    let side = (RULE_WIDTH - title.len()) / 2;
    writeln!(out, "{}{title}{}", "=".repeat(side), "=".repeat(side))?;
    writeln!(out, "File Loaded: {}", report.catalog_path)?;
    writeln!(out, "Courses: {}", report.course_count)?;
    writeln!(out, "Load Time: {} us", report.load_us)?;
    writeln!(out, "Iterations per method: {}", report.iterations)?;
    writeln!(out, "Ordered index (iterate + touch data): {} us", report.ordered_us)?;
    writeln!(out, "Resort (collect+sort + touch data): {} us", report.resort_us)?;
    if let Some(ratio) = report.ratio {
        writeln!(out, "Resort / ordered ratio: {ratio:.2}x")?;
    }
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub fn run(
    catalog: Option<String>,
    iterations: Option<usize>,
    json_output: bool,
    config: &Config,
) {
    let path = config.catalog_path(catalog.as_deref());
    let iterations = iterations.unwrap_or(config.bench_iterations);
    if !path.exists() {
        eprintln!("error: catalog file not found: {}", path.display());
        std::process::exit(1);
    }

    let mut catalog = Catalog::new(config.memo_policy);
    let report = measure(&mut catalog, &path, iterations).unwrap_or_else(|e| {
        eprintln!("error: benchmark aborted, data did not load: {e}");
        std::process::exit(1);
    });

    if json_output {
        print_json(&report);
    } else {
        write_stdout_or_exit(|out| write_report(out, &report));
    }
}
