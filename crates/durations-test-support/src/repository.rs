//! Test repositories: mock store implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use durations_core::error::DomainError;
use durations_core::record::TurnRecord;
use durations_core::repository::{StateRepository, TurnOrderStore};

/// A turn order store that starts from the given records and records every
/// write. Reads always return the most recent write.
#[derive(Debug, Default)]
pub struct RecordingTurnOrderStore {
    current: Mutex<Vec<TurnRecord>>,
    writes: Mutex<Vec<Vec<TurnRecord>>>,
}

impl RecordingTurnOrderStore {
    /// Create a store holding `records`.
    #[must_use]
    pub fn new(records: Vec<TurnRecord>) -> Self {
        Self {
            current: Mutex::new(records),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the current records without recording a write, as a manual
    /// edit on the platform would.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn replace(&self, records: Vec<TurnRecord>) {
        *self.current.lock().unwrap() = records;
    }

    /// Returns the current records.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn current(&self) -> Vec<TurnRecord> {
        self.current.lock().unwrap().clone()
    }

    /// Returns a snapshot of every write, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn writes(&self) -> Vec<Vec<TurnRecord>> {
        self.writes.lock().unwrap().clone()
    }
}

impl TurnOrderStore for RecordingTurnOrderStore {
    fn load(&self) -> Result<Vec<TurnRecord>, DomainError> {
        Ok(self.current.lock().unwrap().clone())
    }

    fn store(&self, records: &[TurnRecord]) -> Result<(), DomainError> {
        *self.current.lock().unwrap() = records.to_vec();
        self.writes.lock().unwrap().push(records.to_vec());
        Ok(())
    }
}

/// A turn order store that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingTurnOrderStore;

impl TurnOrderStore for FailingTurnOrderStore {
    fn load(&self) -> Result<Vec<TurnRecord>, DomainError> {
        Err(DomainError::Infrastructure("campaign unavailable".into()))
    }

    fn store(&self, _records: &[TurnRecord]) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("campaign unavailable".into()))
    }
}

/// A turn order that can be read but rejects every write.
#[derive(Debug, Default)]
pub struct ReadOnlyTurnOrderStore {
    records: Vec<TurnRecord>,
}

impl ReadOnlyTurnOrderStore {
    /// Create a store that always reads back `records`.
    #[must_use]
    pub fn new(records: Vec<TurnRecord>) -> Self {
        Self { records }
    }
}

impl TurnOrderStore for ReadOnlyTurnOrderStore {
    fn load(&self) -> Result<Vec<TurnRecord>, DomainError> {
        Ok(self.records.clone())
    }

    fn store(&self, _records: &[TurnRecord]) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("turn order is read-only".into()))
    }
}

/// A state repository that keeps documents in memory.
#[derive(Debug, Default)]
pub struct InMemoryStateRepository {
    documents: Mutex<HashMap<String, serde_json::Value>>,
    saves: Mutex<usize>,
}

impl InMemoryStateRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository already holding `document` under `namespace`.
    #[must_use]
    pub fn with_document(namespace: &str, document: serde_json::Value) -> Self {
        let repo = Self::new();
        repo.documents
            .lock()
            .unwrap()
            .insert(namespace.to_owned(), document);
        repo
    }

    /// Returns the document stored under `namespace`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn document(&self, namespace: &str) -> Option<serde_json::Value> {
        self.documents.lock().unwrap().get(namespace).cloned()
    }

    /// Returns how many times `save` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

impl StateRepository for InMemoryStateRepository {
    fn load(&self, namespace: &str) -> Result<Option<serde_json::Value>, DomainError> {
        Ok(self.documents.lock().unwrap().get(namespace).cloned())
    }

    fn save(&self, namespace: &str, document: &serde_json::Value) -> Result<(), DomainError> {
        self.documents
            .lock()
            .unwrap()
            .insert(namespace.to_owned(), document.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

/// A state repository that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingStateRepository;

impl StateRepository for FailingStateRepository {
    fn load(&self, _namespace: &str) -> Result<Option<serde_json::Value>, DomainError> {
        Err(DomainError::Infrastructure("state unavailable".into()))
    }

    fn save(&self, _namespace: &str, _document: &serde_json::Value) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("state unavailable".into()))
    }
}

/// A state repository that serves stored documents but fails every save.
#[derive(Debug, Default)]
pub struct ReadOnlyStateRepository {
    documents: HashMap<String, serde_json::Value>,
}

impl ReadOnlyStateRepository {
    /// Create a repository that loads `document` under `namespace`.
    #[must_use]
    pub fn with_document(namespace: &str, document: serde_json::Value) -> Self {
        Self {
            documents: HashMap::from([(namespace.to_owned(), document)]),
        }
    }
}

impl StateRepository for ReadOnlyStateRepository {
    fn load(&self, namespace: &str) -> Result<Option<serde_json::Value>, DomainError> {
        Ok(self.documents.get(namespace).cloned())
    }

    fn save(&self, _namespace: &str, _document: &serde_json::Value) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("disk full".into()))
    }
}
