use crate::span::Span;

use super::OverlapIndex;

/// Nested-containment-list-style static overlap index: entries are sorted
/// once by start offset with a suffix-max-end array for pruning, then queried
/// read-only.
///
/// True NCLS (Alekseyenko & Lee 2007) nests sublists of contained intervals
/// for an even tighter query; this is the simpler sorted-array analogue with
/// the same asymptotic query behavior and, crucially, the same documented
/// limitation: it is built once from whatever is inserted before the first
/// query, and `insert`/`remove` after that point are no-ops. A duplicate
/// trimmed after that point keeps appearing at its pre-trim span in query
/// results; callers re-check the current span themselves, so this is
/// harmless — see [`super::reconcile_overlaps`].
#[derive(Debug, Default)]
pub(crate) struct NclsIndex {
    pending: Vec<(Span, usize)>,
    built: Option<BuiltIndex>,
}

#[derive(Debug)]
struct BuiltIndex {
    entries: Vec<(Span, usize)>,
    suffix_max_end: Vec<u32>,
}

impl NclsIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn build(&mut self) {
        if self.built.is_some() {
            return;
        }
        let mut entries = std::mem::take(&mut self.pending);
        entries.sort_by_key(|(span, _)| span.start);
        let mut suffix_max_end = vec![0u32; entries.len() + 1];
        for i in (0..entries.len()).rev() {
            suffix_max_end[i] = suffix_max_end[i + 1].max(entries[i].0.end);
        }
        self.built = Some(BuiltIndex {
            entries,
            suffix_max_end,
        });
    }
}

impl OverlapIndex for NclsIndex {
    fn insert(&mut self, span: Span, payload: usize) {
        if self.built.is_none() {
            self.pending.push((span, payload));
        }
    }

    fn remove(&mut self, _payload: usize) {
        // static once built; see module docs
    }

    fn overlapping(&mut self, query: Span) -> Vec<usize> {
        self.build();
        let built = self.built.as_ref().expect("just built");

        let mut out = Vec::new();
        for (idx, (span, payload)) in built.entries.iter().enumerate() {
            if built.suffix_max_end[idx] <= query.start {
                break;
            }
            if span.overlaps(&query) {
                out.push(*payload);
            }
        }
        out
    }
}
