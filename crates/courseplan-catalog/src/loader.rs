//! CSV ingestion: one course per line.
//!
//! ```text
//! KEY, Title[, PREREQ ...]
//! ```
//!
//! Lines are validated and deduplicated here, so the store only ever sees
//! clean records with canonical keys.

use crate::record::{CourseRecord, normalize_key};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

const FIELD_DELIMITER: char = ',';

/// Why a line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadWarningKind {
    /// Fewer than two fields.
    MissingField,
    /// Key or title empty after trimming.
    EmptyField,
    /// Key already seen earlier in the same input.
    DuplicateKey,
}

impl LoadWarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadWarningKind::MissingField => "missing-field",
            LoadWarningKind::EmptyField => "empty-field",
            LoadWarningKind::DuplicateKey => "duplicate-key",
        }
    }
}

/// A skipped line, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadWarning {
    pub line: usize,
    pub kind: LoadWarningKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub message: String,
}

/// Clean records in input order plus everything that was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    pub records: Vec<CourseRecord>,
    pub warnings: Vec<LoadWarning>,
}

impl LoadOutcome {
    pub fn skipped(&self) -> usize {
        self.warnings.len()
    }
}

/// Read course records from a CSV reader.
pub fn read_records(reader: impl BufRead) -> Result<LoadOutcome, LoadError> {
    let mut outcome = LoadOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| LoadError::Io(line_no, e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record = match parse_line(trimmed) {
            Ok(record) => record,
            Err(kind) => {
                let message = match kind {
                    LoadWarningKind::MissingField => "missing course ID or title".to_string(),
                    _ => "empty course ID or title".to_string(),
                };
                push_warning(&mut outcome, line_no, kind, None, message);
                continue;
            }
        };

        if !seen.insert(record.key.clone()) {
            let message = format!(
                "duplicate course ID '{}'; keeping the first occurrence",
                record.key
            );
            push_warning(
                &mut outcome,
                line_no,
                LoadWarningKind::DuplicateKey,
                Some(record.key),
                message,
            );
            continue;
        }

        outcome.records.push(record);
    }

    Ok(outcome)
}

/// Read course records from a CSV file path.
pub fn read_records_from_path(path: impl AsRef<Path>) -> Result<LoadOutcome, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| LoadError::Open(format!("{}: {e}", path.display())))?;
    validate_text_bytes(path, &bytes)?;
    read_records(BufReader::new(bytes.as_slice()))
}

/// Split and normalize one non-blank line.
fn parse_line(line: &str) -> Result<CourseRecord, LoadWarningKind> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
    if fields.len() < 2 {
        return Err(LoadWarningKind::MissingField);
    }

    let key = normalize_key(fields[0]);
    let title = fields[1];
    if key.is_empty() || title.is_empty() {
        return Err(LoadWarningKind::EmptyField);
    }

    Ok(CourseRecord::new(&key, title, &fields[2..]))
}

fn push_warning(
    outcome: &mut LoadOutcome,
    line: usize,
    kind: LoadWarningKind,
    key: Option<String>,
    message: String,
) {
    tracing::warn!(line, kind = kind.as_str(), "skipping line: {message}");
    outcome.warnings.push(LoadWarning {
        line,
        kind,
        key,
        message,
    });
}

fn validate_text_bytes(path: &Path, bytes: &[u8]) -> Result<(), LoadError> {
    if bytes.contains(&0) {
        return Err(LoadError::Corrupt(format!(
            "{}: contains NUL byte(s)",
            path.display()
        )));
    }
    if std::str::from_utf8(bytes).is_err() {
        return Err(LoadError::Corrupt(format!(
            "{}: contains non-UTF-8 byte sequence(s)",
            path.display()
        )));
    }
    Ok(())
}

/// Errors from catalog ingestion.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unable to open {0}")]
    Open(String),

    #[error("line {0}: I/O error: {1}")]
    Io(usize, String),

    #[error("corrupted catalog file: {0}")]
    Corrupt(String),
}
