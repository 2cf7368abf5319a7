use std::collections::HashMap;
use std::sync::Arc;

use crate::fingerprint::FingerprintId;
use crate::span::Span;

/// A previously ingested document, retained so future targets can be
/// compared against it.
///
/// `spans_by_fingerprint_id` only ever holds spans that weren't already
/// explained as a duplicate when this document was ingested (see the
/// blacklisting step in [`crate::DuplicateFinder::find_duplicates`]), so a
/// chunk copied `A -> B -> C` surfaces in `C` as a duplicate of `A`, not `B`.
#[derive(Debug, Clone)]
pub(crate) struct Document {
    pub(crate) id: Arc<str>,
    pub(crate) spans_by_fingerprint_id: HashMap<FingerprintId, Vec<Span>>,
}
