//! JSON file implementation of the `StateRepository` trait.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use durations_core::error::DomainError;
use durations_core::repository::StateRepository;
use serde_json::{Map, Value};

/// Keeps every namespace's document in one JSON object on disk.
///
/// Saves write the whole object to a sibling temp file and rename it over the
/// original, so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStateRepository {
    path: PathBuf,
    documents: Mutex<Map<String, Value>>,
}

impl JsonFileStateRepository {
    /// Opens the file at `path`. A missing file is an empty repository; it is
    /// created on the first save.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the file exists but cannot be
    /// read or is not a JSON object.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref().to_path_buf();
        let documents = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                DomainError::Infrastructure(format!("reading {}: {e}", path.display()))
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                DomainError::Infrastructure(format!("parsing {}: {e}", path.display()))
            })?
        } else {
            Map::new()
        };
        tracing::debug!(path = %path.display(), namespaces = documents.len(), "opened state file");
        Ok(Self {
            path,
            documents: Mutex::new(documents),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, documents: &Map<String, Value>) -> Result<(), DomainError> {
        let temp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(documents).map_err(|e| {
            DomainError::Infrastructure(format!("state serialization failed: {e}"))
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                DomainError::Infrastructure(format!("creating {}: {e}", parent.display()))
            })?;
        }
        fs::write(&temp_path, bytes).map_err(|e| {
            DomainError::Infrastructure(format!("writing {}: {e}", temp_path.display()))
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            DomainError::Infrastructure(format!("replacing {}: {e}", self.path.display()))
        })?;

        tracing::debug!(path = %self.path.display(), "saved state file");
        Ok(())
    }
}

fn poisoned() -> DomainError {
    DomainError::Infrastructure("state lock poisoned".to_owned())
}

impl StateRepository for JsonFileStateRepository {
    fn load(&self, namespace: &str) -> Result<Option<Value>, DomainError> {
        let documents = self.documents.lock().map_err(|_| poisoned())?;
        Ok(documents.get(namespace).cloned())
    }

    fn save(&self, namespace: &str, document: &Value) -> Result<(), DomainError> {
        let mut documents = self.documents.lock().map_err(|_| poisoned())?;
        let mut updated = documents.clone();
        updated.insert(namespace.to_owned(), document.clone());
        self.write(&updated)?;
        *documents = updated;
        Ok(())
    }
}
