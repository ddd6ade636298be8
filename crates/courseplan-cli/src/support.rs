use crate::config::{Config, apply_env_overrides, load_config};
use courseplan_catalog::{Catalog, CatalogStore, CourseRecord, LoadSummary, MemoPolicy};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub fn load_config_or_exit(explicit: Option<&str>) -> Config {
    let mut config = load_config(explicit.map(Path::new)).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

/// Install the stderr log subscriber.
///
/// An explicit `--log-level` wins; otherwise `RUST_LOG`, otherwise the
/// configured level.
pub fn init_tracing(flag: Option<&str>, configured: &str) {
    let filter = match flag {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured)),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn load_catalog_or_exit(path: &Path, policy: MemoPolicy) -> (Catalog, LoadSummary) {
    if !path.exists() {
        eprintln!("error: catalog file not found: {}", path.display());
        std::process::exit(1);
    }
    let mut catalog = Catalog::new(policy);
    let summary = catalog.load_path(path).unwrap_or_else(|e| {
        eprintln!("error: failed to load {}: {e}", path.display());
        std::process::exit(1);
    });
    (catalog, summary)
}

/// Records in key order, found by collecting and sorting the keys on every
/// call rather than reading the maintained index.
pub fn resorted_records(store: &CatalogStore) -> Vec<&CourseRecord> {
    let mut keys: Vec<&str> = store.keys_unordered().collect();
    keys.sort_unstable();
    keys.into_iter().filter_map(|key| store.get(key)).collect()
}

pub fn print_json(payload: &impl Serialize) {
    let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|e| {
        eprintln!("error: failed to render JSON payload: {e}");
        std::process::exit(2);
    });
    println!("{rendered}");
}

pub fn write_stdout_or_exit(write: impl FnOnce(&mut io::StdoutLock<'static>) -> io::Result<()>) {
    let mut out = io::stdout().lock();
    if let Err(e) = write(&mut out).and_then(|()| out.flush()) {
        eprintln!("error: failed to write output: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resorted_records_match_the_ordered_index() {
        let mut catalog = Catalog::default();
        catalog.load_records(
            ["MATH201", "CSCI300", "CSCI100", "BIOL101"]
                .into_iter()
                .map(|key| CourseRecord::new(key, key, Vec::<String>::new()))
                .collect(),
        );

        let resorted: Vec<&str> = resorted_records(catalog.store())
            .into_iter()
            .map(|r| r.key.as_str())
            .collect();
        let indexed: Vec<&str> = catalog.store().ordered_keys().collect();
        assert_eq!(resorted, indexed);
    }
}
