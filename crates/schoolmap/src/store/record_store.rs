use super::backend::SlotBackend;
use crate::error::{DirectoryError, Result};
use crate::model::School;
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_SLOT: &str = "schools";

/// Typed view of one slot: the whole collection as a JSON array.
///
/// Cloning is cheap; clones share the backend.
pub struct RecordStore<B: SlotBackend> {
    backend: Arc<B>,
    slot: String,
}

impl<B: SlotBackend> Clone for RecordStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            slot: self.slot.clone(),
        }
    }
}

impl<B: SlotBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self::with_shared_backend(Arc::new(backend))
    }

    pub fn with_shared_backend(backend: Arc<B>) -> Self {
        Self {
            backend,
            slot: DEFAULT_SLOT.to_string(),
        }
    }

    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the persisted collection.
    ///
    /// Never fails: a missing slot is the normal first-run state, and an
    /// unreadable or corrupt slot is treated the same way.
    pub async fn load(&self) -> Vec<School> {
        let backend = Arc::clone(&self.backend);
        let slot = self.slot.clone();
        let read = tokio::task::spawn_blocking(move || backend.read_slot(&slot)).await;

        let bytes = match read {
            Ok(Ok(Some(bytes))) => bytes,
            Ok(Ok(None)) => {
                debug!(slot = %self.slot, "No persisted collection, starting empty");
                return Vec::new();
            }
            Ok(Err(e)) => {
                warn!(slot = %self.slot, error = %e, "Failed to read collection, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "Load task failed, starting empty");
                return Vec::new();
            }
        };

        match decode(&bytes) {
            Ok(schools) => {
                debug!(slot = %self.slot, count = schools.len(), "Loaded collection");
                schools
            }
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "Corrupt collection data, starting empty");
                Vec::new()
            }
        }
    }

    /// Serialize the full collection and overwrite the slot.
    pub async fn save(&self, schools: &[School]) -> Result<()> {
        let bytes = encode(schools)?;
        let backend = Arc::clone(&self.backend);
        let slot = self.slot.clone();
        tokio::task::spawn_blocking(move || backend.write_slot(&slot, &bytes))
            .await
            .map_err(|e| DirectoryError::Store(format!("Save task failed: {}", e)))?
    }
}

fn encode(schools: &[School]) -> Result<Vec<u8>> {
    serde_json::to_vec(schools).map_err(DirectoryError::Serialization)
}

fn decode(bytes: &[u8]) -> Result<Vec<School>> {
    serde_json::from_slice(bytes).map_err(DirectoryError::Serialization)
}
