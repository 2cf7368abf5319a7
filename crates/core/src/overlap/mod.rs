mod interval_tree;
mod ncls;
mod none;

use crate::duplicate::Duplicate;
use crate::span::Span;

use interval_tree::IntervalTreeIndex;
use ncls::NclsIndex;
use none::NoneIndex;

/// Which data structure backs overlap queries during the longest-wins trim
/// sweep. All three produce the same final duplicate set for any input;
/// they differ only in how query cost scales with the number of raw
/// duplicates a source/target pair produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapBackend {
    /// Linear scan. Simplest, fastest to build, worst query complexity.
    None,
    /// Augmented interval tree. Good general-purpose choice when duplicates
    /// are trimmed or dropped frequently.
    IntervalTree,
    /// Sorted-array static index, rebuilt lazily on first query. Cheapest
    /// when a source/target pair produces many duplicates that rarely
    /// overlap, since most queries terminate in the suffix-max prefix.
    #[default]
    Ncls,
}

trait OverlapIndex {
    fn insert(&mut self, span: Span, payload: usize);
    fn remove(&mut self, payload: usize);
    fn overlapping(&mut self, query: Span) -> Vec<usize>;
}

enum AnyIndex {
    None(NoneIndex),
    IntervalTree(IntervalTreeIndex),
    Ncls(NclsIndex),
}

impl OverlapIndex for AnyIndex {
    fn insert(&mut self, span: Span, payload: usize) {
        match self {
            Self::None(i) => i.insert(span, payload),
            Self::IntervalTree(i) => i.insert(span, payload),
            Self::Ncls(i) => i.insert(span, payload),
        }
    }

    fn remove(&mut self, payload: usize) {
        match self {
            Self::None(i) => i.remove(payload),
            Self::IntervalTree(i) => i.remove(payload),
            Self::Ncls(i) => i.remove(payload),
        }
    }

    fn overlapping(&mut self, query: Span) -> Vec<usize> {
        match self {
            Self::None(i) => i.overlapping(query),
            Self::IntervalTree(i) => i.overlapping(query),
            Self::Ncls(i) => i.overlapping(query),
        }
    }
}

impl OverlapBackend {
    fn build_index(self) -> AnyIndex {
        match self {
            Self::None => AnyIndex::None(NoneIndex::default()),
            Self::IntervalTree => AnyIndex::IntervalTree(IntervalTreeIndex::new()),
            Self::Ncls => AnyIndex::Ncls(NclsIndex::new()),
        }
    }
}

/// Trims `candidate` given that `winner` (a longer or
/// equal-length duplicate over the same target document) has already been
/// kept. Returns `None` when `candidate` should be dropped entirely: it's
/// fully covered by `winner`, or what survives the trim is shorter than
/// `min_duplicate_length`.
fn trim_or_drop(candidate: &Duplicate, winner: Span, min_duplicate_length: u32) -> Option<Duplicate> {
    let t = candidate.target_span;

    if winner.start <= t.start && t.end <= winner.end {
        return None;
    }

    if winner.start < t.end && t.end <= winner.end {
        let new_length = winner.start - t.start;
        if new_length < min_duplicate_length {
            return None;
        }
        let new_target = Span::new(t.start, winner.start);
        let new_source = Span::new(candidate.source_span.start, candidate.source_span.start + new_length);
        return Some(Duplicate::new(candidate.source_doc_id.clone(), new_source, new_target));
    }

    if winner.start <= t.start && t.start < winner.end {
        let new_length = t.end - winner.end;
        if new_length < min_duplicate_length {
            return None;
        }
        let new_target = Span::new(winner.end, t.end);
        let new_source = Span::new(candidate.source_span.end - new_length, candidate.source_span.end);
        return Some(Duplicate::new(candidate.source_doc_id.clone(), new_source, new_target));
    }

    Some(candidate.clone())
}

/// Reconciles overlapping raw duplicates from a single source/target
/// comparison: repeatedly keeps the longest duplicate still standing and
/// trims or drops everything it overlaps, until none remain.
/// The result is sorted by target span and contains no two duplicates whose
/// target spans overlap.
pub(crate) fn reconcile_overlaps(
    duplicates: Vec<Duplicate>,
    min_duplicate_length: u32,
    backend: OverlapBackend,
) -> Vec<Duplicate> {
    if duplicates.is_empty() {
        return duplicates;
    }

    let mut slots: Vec<Option<Duplicate>> = duplicates.into_iter().map(Some).collect();
    let mut index = backend.build_index();
    for (i, dup) in slots.iter().enumerate() {
        let dup = dup.as_ref().expect("freshly populated");
        index.insert(dup.target_span, i);
    }

    let mut kept = Vec::new();
    loop {
        let longest = slots
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.as_ref().map(|d| (i, d.target_span, d.length())))
            .max_by_key(|&(_, _, len)| len);
        let Some((winner_idx, winner_span, _)) = longest else {
            break;
        };

        let winner = slots[winner_idx].take().expect("just matched Some");
        index.remove(winner_idx);

        for candidate_idx in index.overlapping(winner_span) {
            if candidate_idx == winner_idx {
                continue;
            }
            let Some(candidate) = slots[candidate_idx].clone() else {
                continue;
            };
            // The NCLS backend can return entries at their pre-trim span;
            // re-check against the span actually stored now.
            if !candidate.target_span.overlaps(&winner_span) {
                continue;
            }

            match trim_or_drop(&candidate, winner_span, min_duplicate_length) {
                None => {
                    slots[candidate_idx] = None;
                    index.remove(candidate_idx);
                }
                Some(trimmed) => {
                    if trimmed.target_span != candidate.target_span {
                        index.remove(candidate_idx);
                        index.insert(trimmed.target_span, candidate_idx);
                    }
                    slots[candidate_idx] = Some(trimmed);
                }
            }
        }

        kept.push(winner);
    }

    kept.sort_by_key(|d| (d.target_span.start, d.target_span.end));
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn dup(source_start: u32, target_start: u32, len: u32) -> Duplicate {
        Duplicate::new(
            Arc::from("source"),
            Span::new(source_start, source_start + len),
            Span::new(target_start, target_start + len),
        )
    }

    #[test]
    fn disjoint_duplicates_all_survive() {
        let input = vec![dup(0, 0, 5), dup(100, 20, 5)];
        for backend in [OverlapBackend::None, OverlapBackend::IntervalTree, OverlapBackend::Ncls] {
            let out = reconcile_overlaps(input.clone(), 1, backend);
            assert_eq!(out.len(), 2, "backend {backend:?}");
        }
    }

    #[test]
    fn shorter_overlapping_duplicate_is_trimmed() {
        // winner covers [0,10), unambiguously longer than the candidate's
        // [5,14); the overlapping head of the candidate is trimmed away,
        // leaving [10,14).
        let input = vec![dup(0, 0, 10), dup(100, 5, 9)];
        for backend in [OverlapBackend::None, OverlapBackend::IntervalTree, OverlapBackend::Ncls] {
            let out = reconcile_overlaps(input.clone(), 1, backend);
            assert_eq!(out.len(), 2, "backend {backend:?}");
            assert_eq!(out[0].target_span, Span::new(0, 10));
            assert_eq!(out[1].target_span, Span::new(10, 14));
        }
    }

    #[test]
    fn fully_contained_duplicate_is_dropped() {
        let input = vec![dup(0, 0, 20), dup(100, 5, 3)];
        for backend in [OverlapBackend::None, OverlapBackend::IntervalTree, OverlapBackend::Ncls] {
            let out = reconcile_overlaps(input.clone(), 1, backend);
            assert_eq!(out.len(), 1, "backend {backend:?}");
        }
    }

    #[test]
    fn trim_below_min_length_drops_instead() {
        // same layout as above, but the surviving [10,14) remainder (length
        // 4) is below min_duplicate_length, so the whole candidate is
        // dropped rather than trimmed.
        let input = vec![dup(0, 0, 10), dup(100, 5, 9)];
        for backend in [OverlapBackend::None, OverlapBackend::IntervalTree, OverlapBackend::Ncls] {
            let out = reconcile_overlaps(input.clone(), 5, backend);
            assert_eq!(out.len(), 1, "backend {backend:?}");
            assert_eq!(out[0].target_span, Span::new(0, 10));
        }
    }
}
