//! # Schoolmap Architecture
//!
//! Schoolmap is the **UI-agnostic core** of a school directory: a map of
//! schools you can browse, search, filter by category, and add to. Screens,
//! navigation and device services live elsewhere and talk to this crate.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Facade (api.rs)                                            │
//! │  - Directory: composition root, the one entry point         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State + Logic                                              │
//! │  - collection.rs: authoritative school list, subscriptions  │
//! │  - filter.rs: query text + category selection               │
//! │  - search.rs: pure derived view + memo                      │
//! │  - add.rs: draft → validated School                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - SlotBackend trait: FsBackend, MemBackend                 │
//! │  - RecordStore (JSON), SaveQueue (serialized writer task)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Device collaborators (position, reverse geocoding, photo picker) are
//! traits in [`location`]; the host app implements them.
//!
//! ## No I/O Assumptions in Core
//!
//! Nothing here prints, exits, or installs a tracing subscriber. Saves run on
//! a tokio task, so a runtime must be available when a [`api::Directory`] is
//! created.
//!
//! ## Module Overview
//!
//! - [`api`]: the `Directory` facade
//! - [`collection`]: in-memory collection and change notification
//! - [`filter`]: session filter state
//! - [`search`]: filtering and the memoized view
//! - [`add`]: the add-school flow
//! - [`location`]: device collaborator traits and address fallback
//! - [`store`]: slot persistence
//! - [`model`]: `School`, `Category`, `Coordinates`
//! - [`observe`]: subscription lists
//! - [`links`], [`map`]: contact links and map focus
//! - [`config`]: configuration
//! - [`error`]: error types

pub mod add;
pub mod api;
pub mod collection;
pub mod config;
pub mod error;
pub mod filter;
pub mod links;
pub mod location;
pub mod map;
pub mod model;
pub mod observe;
pub mod search;
pub mod store;

pub use api::Directory;
pub use error::{DirectoryError, Result};
pub use model::{Category, Coordinates, School, SchoolId, Snapshot};
