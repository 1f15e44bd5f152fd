//! # Directory Facade
//!
//! [`Directory`] is the composition root: it owns the record store, the save
//! queue (inside the collection manager), the filter state and the view memo,
//! and is the single entry point a UI talks to.
//!
//! There are no globals. Create one `Directory` at startup, pass it by
//! reference to whatever renders, drop it at exit.
//!
//! ## Startup
//!
//! ```text
//! let mut dir = Directory::new(backend, config)?;  // empty, not hydrated
//! dir.collection_mut().subscribe(|snapshot| ...); // optional
//! dir.hydrate().await;                             // one notification if data exists
//! ```
//!
//! [`Directory::open`] and [`Directory::with_backend`] do all of this in one
//! step when no subscriber needs the initial population.
//!
//! Generic over [`SlotBackend`]:
//! - Production: `Directory<FsBackend>`
//! - Testing: `Directory<MemBackend>`

use crate::add::SchoolDraft;
use crate::collection::CollectionManager;
use crate::config::DirectoryConfig;
use crate::error::Result;
use crate::filter::FilterState;
use crate::map::{self, MapRegion};
use crate::model::{School, SchoolId};
use crate::search::ViewCache;
use crate::store::{FsBackend, RecordStore, SaveHandle, SaveQueue, SlotBackend};
use std::time::Duration;
use tracing::info;

pub struct Directory<B: SlotBackend> {
    store: RecordStore<B>,
    collection: CollectionManager,
    filters: FilterState,
    view: ViewCache,
    config: DirectoryConfig,
}

impl Directory<FsBackend> {
    /// Open the on-disk directory described by `config` and load it.
    pub async fn open(config: DirectoryConfig) -> Result<Self> {
        let root = config.resolved_data_dir()?;
        info!(path = %root.display(), slot = %config.slot, "Opening school directory");
        Self::with_backend(FsBackend::new(root), config).await
    }
}

impl<B: SlotBackend> Directory<B> {
    /// Wire up an empty, not yet hydrated directory.
    /// Fails when called outside a tokio runtime.
    pub fn new(backend: B, config: DirectoryConfig) -> Result<Self> {
        let store = RecordStore::with_backend(backend).with_slot(config.slot.clone());
        let collection = CollectionManager::new(SaveQueue::spawn(store.clone())?);
        Ok(Self {
            store,
            collection,
            filters: FilterState::new(),
            view: ViewCache::new(),
            config,
        })
    }

    /// Wire up a directory over `backend` and load it.
    pub async fn with_backend(backend: B, config: DirectoryConfig) -> Result<Self> {
        let mut directory = Self::new(backend, config)?;
        directory.hydrate().await;
        Ok(directory)
    }

    /// Load the persisted collection. Only the first call does anything.
    pub async fn hydrate(&mut self) -> usize {
        self.collection.hydrate(&self.store).await
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn collection(&self) -> &CollectionManager {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut CollectionManager {
        &mut self.collection
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    pub fn schools(&self) -> &[School] {
        self.collection.schools()
    }

    pub fn school(&self, id: &SchoolId) -> Option<&School> {
        self.collection.get(id)
    }

    /// Validate and submit a draft.
    ///
    /// Before [`Directory::hydrate`] the save is held back, so the handle
    /// resolves only once hydration has run.
    pub fn add_school(&mut self, draft: &SchoolDraft) -> Result<(School, SaveHandle)> {
        draft.submit(&mut self.collection)
    }

    /// Schools matching the current query and categories, in collection order.
    pub fn visible(&mut self) -> &[School] {
        self.view.view(&self.collection, &self.filters)
    }

    /// Map region centered on the most recently added school.
    pub fn focus_region(&self) -> MapRegion {
        map::focus_region(MapRegion::default(), self.collection.schools())
    }

    pub fn geocode_timeout(&self) -> Duration {
        self.config.geocode_timeout()
    }

    /// Wait for all queued saves to land.
    ///
    /// Saves held back until hydration are not queued yet and are not waited for.
    pub async fn flush(&self) {
        self.collection.flush().await;
    }
}
