//! Local collection store - the in-memory mirror of the remote collection.
//!
//! The store performs no remote calls. Each mutator is applied after the
//! matching remote operation has succeeded and returns the new snapshot.

use thiserror::Error;

use crate::models::Employee;

/// Programming-error conditions raised by [`CollectionStore::append`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Cannot store a record without an identifier")]
    MissingIdentifier,

    #[error("Record {0} is already in the collection")]
    DuplicateIdentifier(String),
}

/// Ordered list of employee records plus load status.
///
/// Order is the server's order on load; created records are appended and
/// updates keep their position.
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    records: Vec<Employee>,
    loading: bool,
    error: Option<String>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection with a fresh listing.
    pub fn replace_all(&mut self, records: Vec<Employee>) -> &[Employee] {
        self.records = records;
        self.error = None;
        &self.records
    }

    /// Appends a newly created record.
    pub fn append(&mut self, record: Employee) -> Result<&[Employee], StoreError> {
        if !record.has_id() {
            return Err(StoreError::MissingIdentifier);
        }
        if self.contains(&record.id) {
            return Err(StoreError::DuplicateIdentifier(record.id));
        }

        self.records.push(record);
        self.error = None;
        Ok(&self.records)
    }

    /// Replaces the record with the same identifier, in place.
    ///
    /// An unknown identifier leaves the collection unchanged.
    pub fn replace_by_id(&mut self, record: Employee) -> &[Employee] {
        self.error = None;
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => {
                tracing::warn!(id = %record.id, "updated record is not in the collection");
            }
        }
        &self.records
    }

    /// Removes the record with the given identifier, if present.
    pub fn remove_by_id(&mut self, id: &str) -> &[Employee] {
        self.error = None;
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            tracing::debug!(%id, "removed record was not in the collection");
        }
        &self.records
    }

    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True only while the initial listing is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Message of the last failed load, cleared by any successful operation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks the load as failed: the collection is emptied and the message kept.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.records.clear();
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, first_name: &str) -> Employee {
        Employee::new(first_name, "Lee", format!("{}@example.com", first_name)).with_id(id)
    }

    fn ids(records: &[Employee]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_replace_all_keeps_server_order() {
        let mut store = CollectionStore::new();
        let listed = vec![employee("3", "C"), employee("1", "A"), employee("2", "B")];

        let snapshot = store.replace_all(listed.clone());
        assert_eq!(snapshot, listed.as_slice());
    }

    #[test]
    fn test_append_grows_by_one_per_create() {
        let mut store = CollectionStore::new();
        for i in 0..5 {
            store.append(employee(&i.to_string(), "Ann")).unwrap();
        }
        assert_eq!(store.len(), 5);
        assert_eq!(ids(store.records()), vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_append_rejects_duplicate_and_missing_identifiers() {
        let mut store = CollectionStore::new();
        store.append(employee("1", "Ann")).unwrap();

        assert_eq!(
            store.append(employee("1", "Other")).unwrap_err(),
            StoreError::DuplicateIdentifier("1".to_string())
        );
        assert_eq!(
            store.append(employee("", "Draft")).unwrap_err(),
            StoreError::MissingIdentifier
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].first_name, "Ann");
    }

    #[test]
    fn test_replace_by_id_preserves_position() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![employee("1", "A"), employee("2", "B"), employee("3", "C")]);

        let snapshot = store.replace_by_id(employee("2", "Bea"));
        assert_eq!(ids(snapshot), vec!["1", "2", "3"]);
        assert_eq!(store.get("2").unwrap().first_name, "Bea");
    }

    #[test]
    fn test_replace_by_unknown_id_is_a_no_op() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![employee("1", "A"), employee("2", "B")]);
        let before = store.records().to_vec();

        store.replace_by_id(employee("9", "Zed"));
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn test_remove_by_id_is_idempotent() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![employee("1", "A"), employee("2", "B")]);

        store.remove_by_id("1");
        assert!(!store.contains("1"));
        assert_eq!(ids(store.records()), vec!["2"]);

        store.remove_by_id("1");
        assert_eq!(ids(store.records()), vec!["2"]);
    }

    #[test]
    fn test_failure_empties_collection_and_success_clears_error() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![employee("1", "A")]);

        store.fail("Failed to fetch employees");
        assert!(store.is_empty());
        assert_eq!(store.error(), Some("Failed to fetch employees"));

        store.append(employee("2", "B")).unwrap();
        assert_eq!(store.error(), None);
    }

    #[test]
    fn test_misses_still_clear_the_load_error() {
        let mut store = CollectionStore::new();

        store.fail("Employee service is unreachable");
        store.remove_by_id("1");
        assert_eq!(store.error(), None);

        store.fail("Employee service is unreachable");
        store.replace_by_id(employee("1", "A"));
        assert_eq!(store.error(), None);
        assert!(store.is_empty());
    }
}
