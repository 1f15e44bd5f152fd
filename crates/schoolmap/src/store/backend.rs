use crate::error::Result;
use std::sync::Arc;

/// Abstract interface for raw slot I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (encoding, fallback on bad data).
pub trait SlotBackend: Send + Sync + 'static {
    /// Read the raw bytes of a slot.
    /// Returns Ok(None) if the slot has never been written.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_slot(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Overwrite a slot with new bytes.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_slot(&self, name: &str, bytes: &[u8]) -> Result<()>;
}

impl<B: SlotBackend> SlotBackend for Arc<B> {
    fn read_slot(&self, name: &str) -> Result<Option<Vec<u8>>> {
        (**self).read_slot(name)
    }

    fn write_slot(&self, name: &str, bytes: &[u8]) -> Result<()> {
        (**self).write_slot(name, bytes)
    }
}
