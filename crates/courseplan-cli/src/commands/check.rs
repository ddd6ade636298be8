use crate::config::Config;
use crate::support::{load_catalog_or_exit, print_json};
use courseplan_catalog::{CatalogCheckReport, check_catalog};
use serde_json::json;

fn print_report(report: &CatalogCheckReport) {
    println!(
        "[catalog] {} (courses={}, edges={}, errors={}, warnings={})",
        if report.accepted() { "OK" } else { "FAIL" },
        report.summary.course_count,
        report.summary.edge_count,
        report.summary.error_count,
        report.summary.warning_count
    );
    for finding in &report.errors {
        println!(
            "  - {} {} ({})",
            finding.course, finding.class, finding.message
        );
    }
    for finding in &report.warnings {
        println!(
            "  - WARN {} {} ({})",
            finding.course, finding.class, finding.message
        );
    }
}

pub fn run(catalog: Option<String>, json_output: bool, config: &Config) {
    let path = config.catalog_path(catalog.as_deref());
    let (mut catalog, summary) = load_catalog_or_exit(&path, config.memo_policy);
    let report = check_catalog(&mut catalog);

    if json_output {
        print_json(&json!({
            "catalogPath": path.display().to_string(),
            "snapshotRef": summary.snapshot_ref,
            "skippedLines": summary.warnings,
            "report": report,
        }));
    } else {
        print_report(&report);
        for warning in &summary.warnings {
            println!(
                "  - SKIP line {} {} ({})",
                warning.line,
                warning.kind.as_str(),
                warning.message
            );
        }
    }

    if !report.accepted() {
        std::process::exit(1);
    }
}
