//! # Storage Layer
//!
//! The whole collection lives in a single named **slot**: one JSON array of
//! schools. There is no per-record storage; every save rewrites the slot.
//!
//! ## Layers
//!
//! - [`backend::SlotBackend`]: raw bytes in and out of a slot. Writes must be
//!   atomic from the reader's point of view.
//!   - [`fs_backend::FsBackend`]: `{root}/{slot}.json`, written via temp file + rename.
//!   - [`mem_backend::MemBackend`]: in-memory, for tests; can simulate write failures.
//! - [`record_store::RecordStore`]: JSON encoding over a backend. `load` never
//!   fails (missing or corrupt data means an empty collection), `save` reports
//!   failures.
//! - [`save_queue::SaveQueue`]: the one writer task. Saves are serialized and
//!   coalesced, and each caller gets a [`save_queue::SaveHandle`] to await or drop.
//!
//! ## Storage Layout
//!
//! ```text
//! {data_dir}/
//! └── schools.json    # [{"id": ..., "name": ..., "category": ..., "location": {...}}, ...]
//! ```
//!
//! The in-memory collection is authoritative. The slot is a mirror: a failed
//! write is reported through the handle and logged, never rolled back.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;
pub mod save_queue;

pub use backend::SlotBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
pub use record_store::{RecordStore, DEFAULT_SLOT};
pub use save_queue::{SaveHandle, SaveQueue};
