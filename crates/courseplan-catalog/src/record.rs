//! Course record: the primary entity of the catalog.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A course as stored in the catalog.
///
/// `key` is canonical (trimmed, ASCII-uppercased) by the time a record
/// reaches the store. Prerequisite keys keep their declared order and may
/// name courses that were never loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub key: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<String>,
}

impl CourseRecord {
    /// Build a record from raw parts, normalizing the key and every
    /// prerequisite token. Empty prerequisite tokens are dropped.
    pub fn new<I, S>(key: &str, title: &str, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            key: normalize_key(key),
            title: title.trim().to_string(),
            prerequisites: prerequisites
                .into_iter()
                .map(|p| normalize_key(p.as_ref()))
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Feed this record's identity and content into a running digest.
    pub(crate) fn digest_into(&self, hasher: &mut Sha256) {
        hasher.update(self.key.as_bytes());
        hasher.update([0x1f]);
        hasher.update(self.title.as_bytes());
        for prereq in &self.prerequisites {
            hasher.update([0x1e]);
            hasher.update(prereq.as_bytes());
        }
        hasher.update([0x0a]);
    }
}

/// Canonical key form: surrounding whitespace trimmed, ASCII uppercased.
///
/// Applied once at ingestion (and to user-typed lookups); the engine never
/// re-normalizes keys it already holds.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_key_and_prerequisites() {
        let record =
            CourseRecord::new(" csci200 ", " Data Structures ", ["csci101", " ", "math201 "]);
        assert_eq!(record.key, "CSCI200");
        assert_eq!(record.title, "Data Structures");
        assert_eq!(record.prerequisites, vec!["CSCI101", "MATH201"]);
    }

    #[test]
    fn prerequisites_are_omitted_from_json_when_empty() {
        let record = CourseRecord::new("csci100", "Intro", Vec::<String>::new());
        let raw = serde_json::to_string(&record).expect("record should serialize");
        assert_eq!(raw, r#"{"key":"CSCI100","title":"Intro"}"#);
    }

    #[test]
    fn duplicate_prerequisites_are_preserved() {
        let record = CourseRecord::new("a", "A", ["b", "B"]);
        assert_eq!(record.prerequisites, vec!["B", "B"]);
    }
}
