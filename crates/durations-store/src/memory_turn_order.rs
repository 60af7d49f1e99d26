//! In-memory implementation of the `TurnOrderStore` trait.

use std::sync::Mutex;

use durations_core::error::DomainError;
use durations_core::record::TurnRecord;
use durations_core::repository::TurnOrderStore;

/// The shared turn order held in process memory.
///
/// The host mirrors the platform's snapshot in with [`replace`] before
/// delivering a change notification; the tracker writes through
/// [`TurnOrderStore::store`].
///
/// [`replace`]: MemoryTurnOrder::replace
#[derive(Debug, Default)]
pub struct MemoryTurnOrder {
    records: Mutex<Vec<TurnRecord>>,
}

impl MemoryTurnOrder {
    /// Creates an empty turn order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the turn order with a snapshot taken on the platform.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock is poisoned.
    pub fn replace(&self, records: Vec<TurnRecord>) -> Result<(), DomainError> {
        *self.records.lock().map_err(|_| poisoned())? = records;
        Ok(())
    }

    /// The current turn order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Vec<TurnRecord>, DomainError> {
        Ok(self.records.lock().map_err(|_| poisoned())?.clone())
    }
}

fn poisoned() -> DomainError {
    DomainError::Infrastructure("turn order lock poisoned".to_owned())
}

impl TurnOrderStore for MemoryTurnOrder {
    fn load(&self) -> Result<Vec<TurnRecord>, DomainError> {
        self.snapshot()
    }

    fn store(&self, records: &[TurnRecord]) -> Result<(), DomainError> {
        self.replace(records.to_vec())
    }
}
