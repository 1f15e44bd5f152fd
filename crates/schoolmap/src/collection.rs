//! # Collection Manager
//!
//! The one authoritative, in-memory copy of every school. All reads go
//! through [`CollectionManager::snapshot`]; the only mutation is
//! [`CollectionManager::add_school`].
//!
//! Subscribers see a sequence of snapshots that only ever grows at the end:
//! nothing is removed and nothing is reordered.
//!
//! Persistence trails memory. `add_school` updates the collection, notifies,
//! then hands the new snapshot to the [`SaveQueue`] and returns without
//! waiting. A failed write leaves memory as it is.

use crate::model::{School, SchoolId, Snapshot};
use crate::observe::{SubscriptionId, Subscribers};
use crate::store::save_queue::SaveReply;
use crate::store::{RecordStore, SaveHandle, SaveQueue, SlotBackend};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct CollectionManager {
    snapshot: Snapshot,
    revision: u64,
    hydrated: bool,
    // Saves held back until hydration, so a partial collection never
    // overwrites the persisted one.
    deferred: Vec<SaveReply>,
    subscribers: Subscribers<Snapshot>,
    queue: SaveQueue,
}

impl CollectionManager {
    pub fn new(queue: SaveQueue) -> Self {
        Self {
            snapshot: Arc::from(Vec::new()),
            revision: 0,
            hydrated: false,
            deferred: Vec::new(),
            subscribers: Subscribers::new(),
            queue,
        }
    }

    /// Register a callback invoked after each committed change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot) + Send + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Populate the collection from the store. Runs at most once.
    ///
    /// Subscribers are notified once if anything was loaded and not at all
    /// otherwise. Loaded records go after any schools added before hydration,
    /// so no subscriber sees an earlier snapshot reordered. Saves for those
    /// early additions are issued now, with the merged collection.
    /// Returns the number of records loaded.
    pub async fn hydrate<B: SlotBackend>(&mut self, store: &RecordStore<B>) -> usize {
        if self.hydrated {
            return 0;
        }

        let loaded = store.load().await;
        self.hydrated = true;
        let count = loaded.len();

        if count == 0 {
            debug!("Hydrated with an empty collection");
        } else {
            let mut schools = self.snapshot.to_vec();
            schools.extend(loaded);
            self.commit(schools);
            debug!(count, total = self.snapshot.len(), "Hydrated collection");
        }

        if !self.deferred.is_empty() {
            let replies = std::mem::take(&mut self.deferred);
            self.queue.enqueue_with(self.snapshot(), replies);
        }
        count
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Append a school, notify subscribers, and queue a save.
    ///
    /// The caller supplies a complete school (id generated, location set).
    /// The returned handle can be awaited for the write outcome or dropped.
    /// Before hydration the save is held back and the handle resolves only
    /// after [`CollectionManager::hydrate`].
    pub fn add_school(&mut self, school: School) -> SaveHandle {
        if self.get(&school.id).is_some() {
            warn!(id = %school.id, "Adding a school whose id is already in the collection");
        }
        debug!(id = %school.id, name = %school.name, "Adding school");

        let mut schools = self.snapshot.to_vec();
        schools.push(school);
        self.commit(schools);

        if !self.hydrated {
            let (handle, reply) = SaveHandle::pending();
            self.deferred.push(reply);
            return handle;
        }
        self.queue.enqueue(self.snapshot())
    }

    /// Wait for every queued save to finish. Saves held back until
    /// hydration are not queued yet, so they are not waited for.
    pub async fn flush(&self) {
        self.queue.flush().await;
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.snapshot)
    }

    pub fn schools(&self) -> &[School] {
        &self.snapshot
    }

    pub fn get(&self, id: &SchoolId) -> Option<&School> {
        self.snapshot.iter().find(|s| &s.id == id)
    }

    /// The most recently added school.
    pub fn last(&self) -> Option<&School> {
        self.snapshot.last()
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Bumped on every committed change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn commit(&mut self, schools: Vec<School>) {
        self.snapshot = Arc::from(schools);
        self.revision += 1;
        self.subscribers.notify(&self.snapshot);
    }
}
