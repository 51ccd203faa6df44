//! Record repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide keyed CRUD primitives over one ordered collection.
//! - Keep collection ordering rules inside the storage boundary.
//!
//! # Invariants
//! - New records are inserted at the front (newest first).
//! - Seed order is preserved as loaded.
//! - Removal is physical; removed ids are gone from every read path.

use crate::model::record::{Keyed, RecordId};

/// Repository interface for one keyed, ordered collection.
pub trait RecordRepository<T: Keyed> {
    /// Inserts a record ahead of every existing record.
    fn insert_front(&mut self, record: T);
    fn get(&self, id: &RecordId) -> Option<&T>;
    fn get_mut(&mut self, id: &RecordId) -> Option<&mut T>;
    /// Removes one record, returning it when it existed.
    fn remove(&mut self, id: &RecordId) -> Option<T>;
    /// All records in display order.
    fn records(&self) -> &[T];

    fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// Vector-backed repository; state lives only as long as the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryRepository<T> {
    records: Vec<T>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Keyed> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads seed records in the given display order.
    pub fn from_seed(records: Vec<T>) -> Self {
        Self { records }
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.record_id() == id)
    }
}

impl<T: Keyed> RecordRepository<T> for InMemoryRepository<T> {
    fn insert_front(&mut self, record: T) {
        self.records.insert(0, record);
    }

    fn get(&self, id: &RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.record_id() == id)
    }

    fn get_mut(&mut self, id: &RecordId) -> Option<&mut T> {
        self.records
            .iter_mut()
            .find(|record| record.record_id() == id)
    }

    fn remove(&mut self, id: &RecordId) -> Option<T> {
        let index = self.position(id)?;
        Some(self.records.remove(index))
    }

    fn records(&self) -> &[T] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryRepository, RecordRepository};
    use crate::model::record::{Keyed, RecordId};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: RecordId,
        name: &'static str,
    }

    impl Keyed for Item {
        fn record_id(&self) -> &RecordId {
            &self.id
        }
    }

    fn item(id: &str, name: &'static str) -> Item {
        Item {
            id: RecordId::from(id),
            name,
        }
    }

    #[test]
    fn insert_front_prepends_and_keeps_seed_order() {
        let mut repo = InMemoryRepository::from_seed(vec![item("1", "a"), item("2", "b")]);
        repo.insert_front(item("3", "c"));

        let names = repo.records().iter().map(|i| i.name).collect::<Vec<_>>();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn remove_missing_returns_none_and_keeps_records() {
        let mut repo = InMemoryRepository::from_seed(vec![item("1", "a")]);
        assert!(repo.remove(&RecordId::from("9")).is_none());
        assert_eq!(repo.len(), 1);

        let removed = repo.remove(&RecordId::from("1")).unwrap();
        assert_eq!(removed.name, "a");
        assert!(repo.is_empty());
        assert!(!repo.contains(&RecordId::from("1")));
    }
}
