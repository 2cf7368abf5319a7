use crate::span::Span;

use super::OverlapIndex;

/// Linear-scan overlap index. No preprocessing, no pruning — a query walks
/// every live entry. The baseline every other backend is measured against.
#[derive(Debug, Default)]
pub(crate) struct NoneIndex {
    entries: Vec<(Span, usize)>,
}

impl OverlapIndex for NoneIndex {
    fn insert(&mut self, span: Span, payload: usize) {
        self.entries.push((span, payload));
    }

    fn remove(&mut self, payload: usize) {
        self.entries.retain(|&(_, p)| p != payload);
    }

    fn overlapping(&mut self, query: Span) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|(span, _)| span.overlaps(&query))
            .map(|(_, payload)| *payload)
            .collect()
    }
}
