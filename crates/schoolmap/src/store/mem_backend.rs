use super::backend::SlotBackend;
use crate::error::{DirectoryError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory storage backend for testing.
///
/// Writes arrive from the save queue's task, so slots sit behind a `Mutex`.
#[derive(Default)]
pub struct MemBackend {
    slots: Mutex<HashMap<String, Vec<u8>>>,
    simulate_write_error: AtomicBool,
    writes: AtomicUsize,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Test helper to seed a slot with arbitrary (possibly corrupt) bytes.
    pub fn put_raw(&self, name: &str, bytes: impl Into<Vec<u8>>) {
        self.lock().insert(name.to_string(), bytes.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A panic while holding the lock cannot leave a half-written slot.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SlotBackend for MemBackend {
    fn read_slot(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.lock().get(name).cloned())
    }

    fn write_slot(&self, name: &str, bytes: &[u8]) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(DirectoryError::Store("Simulated write error".to_string()));
        }
        self.lock().insert(name.to_string(), bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
