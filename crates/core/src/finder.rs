use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::document::Document;
use crate::duplicate::Duplicate;
use crate::error::FinderError;
use crate::fingerprint::{FingerprintBuilder, FingerprintId};
use crate::overlap::{OverlapBackend, reconcile_overlaps};
use crate::span::Span;

#[derive(Debug, Clone, Copy)]
struct InProgress {
    source_span: Span,
    target_span: Span,
}

/// Builds the raw, possibly target-overlapping duplicates between one
/// source document and the freshly fingerprinted target stream: a
/// two-pointer sweep that extends every in-progress duplicate by every
/// source span sharing the current fingerprint id, branching when more than
/// one source span matches, and flushing anything that fails to extend.
fn build_raw_duplicates(
    source_id: &Arc<str>,
    source_spans_by_fingerprint_id: &HashMap<FingerprintId, Vec<Span>>,
    target_fingerprints: &[(Span, FingerprintId)],
    min_duplicate_length: u32,
) -> Vec<Duplicate> {
    let mut in_progress: Vec<InProgress> = Vec::new();
    let mut finished: Vec<Duplicate> = Vec::new();

    for &(target_span, fid) in target_fingerprints {
        let Some(source_spans) = source_spans_by_fingerprint_id.get(&fid) else {
            continue;
        };
        if source_spans.is_empty() {
            continue;
        }

        let mut extended_flags = vec![false; in_progress.len()];
        let mut extended: Vec<InProgress> = Vec::new();
        let mut merged_source_spans: HashSet<Span> = HashSet::new();

        for (i, d) in in_progress.iter().enumerate() {
            debug_assert!(
                target_span.start >= d.target_span.start,
                "target fingerprints must arrive in non-decreasing order"
            );
            if target_span.start > d.target_span.end {
                continue;
            }

            for &source_span in source_spans {
                // Source-span occurrences aren't ordered relative to `d`
                // the way target spans are, so this combination can be
                // geometrically nonsensical (the candidate source span
                // ends before `d.source_span` starts); reject before
                // constructing a `Span` rather than asserting on it.
                if source_span.end < d.source_span.start {
                    continue;
                }
                let extended_target_len = target_span.end - d.target_span.start;
                let extended_source_len = source_span.end - d.source_span.start;
                if extended_target_len != extended_source_len {
                    continue;
                }
                extended.push(InProgress {
                    source_span: Span::new(d.source_span.start, source_span.end),
                    target_span: Span::new(d.target_span.start, target_span.end),
                });
                merged_source_spans.insert(source_span);
                extended_flags[i] = true;
            }
        }

        for (i, d) in in_progress.iter().enumerate() {
            if !extended_flags[i] && d.target_span.length() >= min_duplicate_length {
                finished.push(Duplicate::new(source_id.clone(), d.source_span, d.target_span));
            }
        }

        in_progress = extended;
        for &source_span in source_spans {
            if !merged_source_spans.contains(&source_span) {
                in_progress.push(InProgress {
                    source_span,
                    target_span,
                });
            }
        }
    }

    for d in in_progress {
        if d.target_span.length() >= min_duplicate_length {
            finished.push(Duplicate::new(source_id.clone(), d.source_span, d.target_span));
        }
    }

    finished
}

/// Streaming duplicate-detection engine: compares each newly submitted
/// document against every document submitted before it.
///
/// Call [`DuplicateFinder::find_duplicates`] with documents in chronological
/// order; a fresh instance has no history.
#[derive(Debug)]
pub struct DuplicateFinder {
    builder: FingerprintBuilder,
    min_duplicate_length: u32,
    overlap_backend: OverlapBackend,
    docs_by_id: HashMap<Arc<str>, Document>,
    doc_order: Vec<Arc<str>>,
}

impl DuplicateFinder {
    pub fn new(
        builder: FingerprintBuilder,
        min_duplicate_length: u32,
        overlap_backend: OverlapBackend,
    ) -> Result<Self, FinderError> {
        if min_duplicate_length < 1 {
            return Err(FinderError::Configuration(
                "min_duplicate_length must be at least 1".to_owned(),
            ));
        }
        Ok(Self {
            builder,
            min_duplicate_length,
            overlap_backend,
            docs_by_id: HashMap::new(),
            doc_order: Vec::new(),
        })
    }

    /// Compares `doc_text` against every previously submitted document and
    /// registers it for future comparisons.
    ///
    /// Returns duplicates grouped by source document submission order, each
    /// group sorted by `(target_span.start, target_span.end)`.
    pub fn find_duplicates(
        &mut self,
        doc_id: impl Into<Arc<str>>,
        doc_text: &str,
    ) -> Result<Vec<Duplicate>, FinderError> {
        let doc_id = doc_id.into();
        if self.docs_by_id.contains_key(&doc_id) {
            return Err(FinderError::DuplicateDocumentId(doc_id));
        }

        let target_fingerprints = self.builder.build_fingerprints(doc_text);

        let mut all_duplicates = Vec::new();
        for source_id in &self.doc_order {
            let source = &self.docs_by_id[source_id];
            let raw = build_raw_duplicates(
                source_id,
                &source.spans_by_fingerprint_id,
                &target_fingerprints,
                self.min_duplicate_length,
            );
            let reconciled = reconcile_overlaps(raw, self.min_duplicate_length, self.overlap_backend);
            all_duplicates.extend(reconciled);
        }

        let mut spans_by_fingerprint_id: HashMap<FingerprintId, Vec<Span>> = HashMap::new();
        for &(span, fid) in &target_fingerprints {
            let covered = all_duplicates.iter().any(|d| d.target_span.overlaps(&span));
            if covered {
                continue;
            }
            spans_by_fingerprint_id.entry(fid).or_default().push(span);
        }

        self.docs_by_id.insert(
            doc_id.clone(),
            Document {
                id: doc_id.clone(),
                spans_by_fingerprint_id,
            },
        );
        self.doc_order.push(doc_id);

        Ok(all_duplicates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::{CharFingerprintBuilder, CharFingerprintConfig};

    fn char_finder(fingerprint_length: usize, orf: usize, min_duplicate_length: u32) -> DuplicateFinder {
        let builder = FingerprintBuilder::Char(
            CharFingerprintBuilder::new(CharFingerprintConfig {
                fingerprint_length,
                orf,
                case_sensitive: true,
                allow_multiline: true,
            })
            .unwrap(),
        );
        DuplicateFinder::new(builder, min_duplicate_length, OverlapBackend::Ncls).unwrap()
    }

    #[test]
    fn first_document_has_no_duplicates() {
        let mut finder = char_finder(5, 1, 5);
        let dups = finder.find_duplicates("d0", "hello world").unwrap();
        assert!(dups.is_empty());
    }

    #[test]
    fn resubmitting_an_id_is_rejected() {
        let mut finder = char_finder(5, 1, 5);
        finder.find_duplicates("d0", "hello world").unwrap();
        let err = finder.find_duplicates("d0", "hello again").unwrap_err();
        assert_eq!(err, FinderError::DuplicateDocumentId(Arc::from("d0")));
    }

    /// An exact repeat of a whole document is reported as a single
    /// duplicate spanning it entirely.
    #[test]
    fn scenario_exact_repeat() {
        let mut finder = char_finder(5, 1, 5);
        finder.find_duplicates("D0", "hello world").unwrap();
        let dups = finder.find_duplicates("D1", "hello world").unwrap();

        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].source_span, Span::new(0, 11));
        assert_eq!(dups[0].target_span, Span::new(0, 11));
    }

    /// A partial match surrounded by different text on both sides is still
    /// found, trimmed down to the shared prefix.
    #[test]
    fn scenario_partial_prefix_match() {
        let mut finder = char_finder(5, 1, 11);
        finder
            .find_duplicates("D0", "Hello Alice, how are you? Hello Frank, how are you?")
            .unwrap();
        let dups = finder.find_duplicates("D1", "Hello Frank, what's up?").unwrap();

        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].target_span, Span::new(0, 11));
        assert_eq!(dups[0].source_span.start, 26);
        assert_eq!(dups[0].source_span.length(), 11);
    }

    /// Two non-overlapping duplicates partition the target.
    #[test]
    fn scenario_two_non_overlapping_duplicates() {
        let mut finder = char_finder(5, 1, 11);
        finder
            .find_duplicates("D0", "Hello Frank, what's up, what's up, how are you?")
            .unwrap();
        let dups = finder.find_duplicates("D1", "Hello Frank, what's up, how are you?").unwrap();

        assert_eq!(dups.len(), 2);
        assert_eq!(dups[0].target_span, Span::new(0, 11));
        assert_eq!(dups[1].target_span, Span::new(13, 36));
    }

    /// A three-hop copy chain. Blacklisting means D2's duplicate attributes
    /// back to D0, the original source, not the intermediate D1.
    #[test]
    fn scenario_blacklisting_attributes_to_original_source() {
        let mut finder = char_finder(5, 1, 5);
        finder.find_duplicates("D0", "the quick brown fox").unwrap();
        finder.find_duplicates("D1", "xxx the quick brown fox yyy").unwrap();
        let dups = finder
            .find_duplicates("D2", "zzz the quick brown fox www")
            .unwrap();

        assert_eq!(dups.len(), 1);
        assert_eq!(&*dups[0].source_doc_id, "D0");
    }

    /// A short fingerprint length catches a duplicate inside a string that
    /// repeats one of its own substrings ("abc" appears twice).
    #[test]
    fn scenario_short_fingerprint_length() {
        let mut finder = char_finder(2, 1, 7);
        finder.find_duplicates("D0", "abcdabc").unwrap();
        let dups = finder.find_duplicates("D1", "abcdabc").unwrap();

        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].source_span, Span::new(0, 7));
        assert_eq!(dups[0].target_span, Span::new(0, 7));
    }

    /// Only the common suffix " Bob" is long enough to clear
    /// `min_duplicate_length`.
    #[test]
    fn scenario_common_suffix_only() {
        let mut finder = char_finder(4, 1, 4);
        finder.find_duplicates("D0", "Hi Bob").unwrap();
        let dups = finder.find_duplicates("D1", "Hello Bob").unwrap();

        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].length(), 4);
        let target = dups[0].target_span;
        assert_eq!(&"Hello Bob"[target.start as usize..target.end as usize], " Bob");
        let source = dups[0].source_span;
        assert_eq!(&"Hi Bob"[source.start as usize..source.end as usize], " Bob");
    }
}
