//! Collaborator ports.
//!
//! Both stores are synchronous: every notification is handled to completion
//! before the next one, so there is nothing to await.

use crate::error::DomainError;
use crate::record::TurnRecord;

/// Accessor for the platform's shared turn order.
pub trait TurnOrderStore: Send + Sync {
    /// Reads the current turn order. An absent turn order reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the platform cannot be read.
    fn load(&self) -> Result<Vec<TurnRecord>, DomainError>;

    /// Replaces the turn order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the platform rejects the write.
    fn store(&self, records: &[TurnRecord]) -> Result<(), DomainError>;
}

/// Namespaced, process-wide persisted state.
pub trait StateRepository: Send + Sync {
    /// Loads the document stored under `namespace`, if any.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the backing store fails.
    fn load(&self, namespace: &str) -> Result<Option<serde_json::Value>, DomainError>;

    /// Replaces the document stored under `namespace`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the backing store fails.
    fn save(&self, namespace: &str, document: &serde_json::Value) -> Result<(), DomainError>;
}
