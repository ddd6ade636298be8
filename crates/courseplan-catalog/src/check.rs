//! Deterministic whole-catalog integrity check.

use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const CATALOG_CHECK_KIND: &str = "courseplan.catalog.check.v1";

pub const FAILURE_CLASS_PREREQUISITE_CYCLE: &str = "catalog.prerequisite.cycle";
pub const WARNING_CLASS_PREREQUISITE_DANGLING: &str = "catalog.prerequisite.dangling";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFinding {
    pub course: String,
    pub class: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCheckSummary {
    pub course_count: usize,
    pub edge_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCheckReport {
    pub check_kind: String,
    pub result: String,
    pub failure_classes: Vec<String>,
    pub warning_classes: Vec<String>,
    pub errors: Vec<CatalogFinding>,
    pub warnings: Vec<CatalogFinding>,
    pub summary: CatalogCheckSummary,
}

impl CatalogCheckReport {
    pub fn accepted(&self) -> bool {
        self.result == "accepted"
    }
}

fn collect_classes(findings: &[CatalogFinding]) -> Vec<String> {
    findings
        .iter()
        .map(|finding| finding.class.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Expand every course and report cycles and dangling references.
pub fn check_catalog(catalog: &mut Catalog) -> CatalogCheckReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for dangling in catalog.graph().dangling_references(catalog.store()) {
        warnings.push(CatalogFinding {
            course: dangling.course,
            class: WARNING_CLASS_PREREQUISITE_DANGLING.to_string(),
            message: format!("prerequisite {} is not a loaded course", dangling.missing),
        });
    }

    let keys: Vec<String> = catalog.store().ordered_keys().map(str::to_string).collect();
    for key in keys {
        if let Err(cycle) = catalog.expand_closure(&key) {
            errors.push(CatalogFinding {
                course: key,
                class: FAILURE_CLASS_PREREQUISITE_CYCLE.to_string(),
                message: cycle.to_string(),
            });
        }
    }

    let failure_classes = collect_classes(&errors);
    let warning_classes = collect_classes(&warnings);
    let result = if errors.is_empty() {
        "accepted".to_string()
    } else {
        "rejected".to_string()
    };
    let summary = CatalogCheckSummary {
        course_count: catalog.store().len(),
        edge_count: catalog.graph().edge_count(),
        error_count: errors.len(),
        warning_count: warnings.len(),
    };

    CatalogCheckReport {
        check_kind: CATALOG_CHECK_KIND.to_string(),
        result,
        failure_classes,
        warning_classes,
        errors,
        warnings,
        summary,
    }
}
