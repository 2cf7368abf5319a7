use std::collections::HashMap;

use super::FingerprintId;

/// Process-local chunk → id table.
///
/// Grows monotonically across every text a builder ever fingerprints: once a
/// chunk has been assigned an id it keeps that id for the table's lifetime,
/// which is how identical chunks across different documents end up sharing a
/// fingerprint id.
#[derive(Debug, Clone, Default)]
pub(super) struct ChunkTable {
    ids: HashMap<String, FingerprintId>,
}

impl ChunkTable {
    pub(super) fn id_for(&mut self, chunk: &str) -> FingerprintId {
        if let Some(&id) = self.ids.get(chunk) {
            return id;
        }
        let id = self.ids.len() as FingerprintId;
        self.ids.insert(chunk.to_owned(), id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_ids_densely_and_reuses_them() {
        let mut table = ChunkTable::default();
        assert_eq!(table.id_for("abc"), 0);
        assert_eq!(table.id_for("def"), 1);
        assert_eq!(table.id_for("abc"), 0);
        assert_eq!(table.id_for("ghi"), 2);
    }
}
