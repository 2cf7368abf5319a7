use std::io;

use docdup_core::Duplicate;
use serde::{Deserialize, Serialize};

/// Mirrors the settings block of a test-case file: enough to construct a
/// `FingerprintBuilder` and a `DuplicateFinder`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TestCaseSettings {
    pub(crate) fingerprint_type: String,
    pub(crate) fingerprint_length: usize,
    pub(crate) min_duplicate_length: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TestCaseDoc {
    pub(crate) id: String,
    pub(crate) text: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub(crate) struct TestCaseDuplicate {
    pub(crate) source_doc_id: String,
    pub(crate) target_doc_id: String,
    pub(crate) source_start: u32,
    pub(crate) source_end: u32,
    pub(crate) target_start: u32,
    pub(crate) target_end: u32,
    pub(crate) text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TestCaseFile {
    pub(crate) settings: TestCaseSettings,
    pub(crate) docs: Vec<TestCaseDoc>,
    pub(crate) duplicates: Vec<TestCaseDuplicate>,
}

pub(crate) fn read_test_case(path: &std::path::Path) -> io::Result<TestCaseFile> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{path:?}: {e}")))
}

/// Turns a `Duplicate` plus the target document's text and id into the same
/// shape a test-case file's `duplicates` array uses, so found and expected
/// duplicates can be compared or printed uniformly.
pub(crate) fn to_test_case_duplicate(target_doc_id: &str, target_text: &str, dup: &Duplicate) -> TestCaseDuplicate {
    let target_chars: Vec<char> = target_text.chars().collect();
    let text = target_chars[dup.target_span.start as usize..dup.target_span.end as usize]
        .iter()
        .collect();
    TestCaseDuplicate {
        source_doc_id: dup.source_doc_id.to_string(),
        target_doc_id: target_doc_id.to_string(),
        source_start: dup.source_span.start,
        source_end: dup.source_span.end,
        target_start: dup.target_span.start,
        target_end: dup.target_span.end,
        text,
    }
}

pub(crate) fn write_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("json encode: {e}")))?;
    println!("{json}");
    Ok(())
}
