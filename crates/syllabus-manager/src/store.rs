use std::collections::HashSet;

use syllabus_core::{ExamRecord, RecordId};

/// Client-side mirror of the server's exam collection.
///
/// Holds records in server order after a fetch and in append order after
/// creations. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<ExamRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a fetched collection, keeping its order.
    /// A repeated id keeps its first occurrence. Returns the new length.
    pub fn replace_all(&mut self, records: Vec<ExamRecord>) -> usize {
        let mut seen = HashSet::with_capacity(records.len());
        let total = records.len();
        self.records = records
            .into_iter()
            .filter(|r| seen.insert(r.id.clone()))
            .collect();

        if self.records.len() != total {
            tracing::warn!(
                "Dropped {} exams with duplicate ids from fetch",
                total - self.records.len()
            );
        }
        self.records.len()
    }

    /// Add a newly created record at the end.
    pub fn append(&mut self, record: ExamRecord) {
        if let Some(pos) = self.position(&record.id) {
            tracing::warn!("Server returned existing exam id {}; replacing", record.id);
            self.records[pos] = record;
            return;
        }
        self.records.push(record);
    }

    /// Swap the record stored under `id` for `record`, keeping its position.
    /// Returns false if `id` is not stored.
    pub fn replace(&mut self, id: &RecordId, record: ExamRecord) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let new_id = record.id.clone();
        self.records[pos] = record;

        // A changed id must not collide with another entry.
        let mut index = 0;
        self.records.retain(|r| {
            let keep = index == pos || r.id != new_id;
            index += 1;
            keep
        });
        true
    }

    /// Remove the record with `id`, if present.
    pub fn remove(&mut self, id: &RecordId) -> Option<ExamRecord> {
        let pos = self.position(id)?;
        Some(self.records.remove(pos))
    }

    pub fn get(&self, id: &RecordId) -> Option<&ExamRecord> {
        self.records.iter().find(|r| r.id == *id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == *id)
    }

    pub fn as_slice(&self) -> &[ExamRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExamRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn exam(id: i64, name: &str) -> ExamRecord {
        ExamRecord::new(id, name, NaiveDate::from_ymd_opt(2025, 10, 25).unwrap())
    }

    fn rid(n: i64) -> RecordId {
        RecordId::Int(n)
    }

    fn ids(store: &RecordStore) -> Vec<RecordId> {
        store.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_replace_all_keeps_server_order() {
        let mut store = RecordStore::new();
        store.append(exam(9, "old"));

        let len = store.replace_all(vec![exam(3, "c"), exam(1, "a"), exam(2, "b")]);

        assert_eq!(len, 3);
        assert_eq!(ids(&store), vec![rid(3), rid(1), rid(2)]);
    }

    #[test]
    fn test_replace_all_drops_duplicate_ids() {
        let mut store = RecordStore::new();

        store.replace_all(vec![exam(1, "first"), exam(2, "b"), exam(1, "second")]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&rid(1)).unwrap().name, "first");
    }

    #[test]
    fn test_append_order() {
        let mut store = RecordStore::new();
        store.append(exam(1, "Parcial 1"));
        store.append(exam(2, "Final"));

        assert_eq!(ids(&store), vec![rid(1), rid(2)]);
    }

    #[test]
    fn test_append_existing_id_replaces() {
        let mut store = RecordStore::new();
        store.append(exam(1, "Parcial 1"));
        store.append(exam(2, "Final"));
        store.append(exam(1, "Parcial 1 bis"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.as_slice()[0].name, "Parcial 1 bis");
    }

    #[test]
    fn test_replace_in_place() {
        let mut store = RecordStore::new();
        store.replace_all(vec![exam(1, "a"), exam(2, "b"), exam(3, "c")]);

        assert!(store.replace(&rid(2), exam(2, "b2")));

        assert_eq!(ids(&store), vec![rid(1), rid(2), rid(3)]);
        assert_eq!(store.as_slice()[1].name, "b2");
    }

    #[test]
    fn test_replace_with_new_id_keeps_unique() {
        let mut store = RecordStore::new();
        store.replace_all(vec![exam(1, "a"), exam(2, "b"), exam(3, "c")]);

        assert!(store.replace(&rid(3), exam(1, "moved")));

        assert_eq!(ids(&store), vec![rid(2), rid(1)]);
        assert_eq!(store.get(&rid(1)).unwrap().name, "moved");
    }

    #[test]
    fn test_replace_missing() {
        let mut store = RecordStore::new();
        store.append(exam(1, "a"));

        assert!(!store.replace(&rid(7), exam(7, "x")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut store = RecordStore::new();
        store.replace_all(vec![exam(1, "a"), exam(2, "b")]);

        let removed = store.remove(&rid(1)).unwrap();

        assert_eq!(removed.name, "a");
        assert_eq!(ids(&store), vec![rid(2)]);
        assert!(store.remove(&rid(1)).is_none());
        assert!(!store.contains(&rid(1)));
    }
}
