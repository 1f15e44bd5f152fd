use super::backend::SlotBackend;
use super::record_store::RecordStore;
use crate::error::{DirectoryError, Result};
use crate::model::Snapshot;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

pub(crate) type SaveOutcome = std::result::Result<(), Arc<DirectoryError>>;
pub(crate) type SaveReply = oneshot::Sender<SaveOutcome>;

enum Message {
    Save {
        snapshot: Snapshot,
        replies: Vec<SaveReply>,
    },
    Flush(oneshot::Sender<()>),
}

/// Single in-flight writer for a [`RecordStore`].
///
/// Every snapshot goes through one task, so two saves never overlap on the
/// slot. Snapshots that pile up while a write is running are coalesced: only
/// the newest one is written and all of their handles get that outcome.
pub struct SaveQueue {
    tx: mpsc::UnboundedSender<Message>,
}

impl SaveQueue {
    /// Spawn the writer task on the current tokio runtime.
    /// Fails with [`DirectoryError::Store`] when there is no runtime.
    pub fn spawn<B: SlotBackend>(store: RecordStore<B>) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| DirectoryError::Store(format!("No tokio runtime for the save queue: {}", e)))?;
        let (tx, rx) = mpsc::unbounded_channel();
        runtime.spawn(run_writer(store, rx));
        Ok(Self { tx })
    }

    /// Queue a full-collection write. Returns immediately.
    pub fn enqueue(&self, snapshot: Snapshot) -> SaveHandle {
        let (handle, reply) = SaveHandle::pending();
        self.enqueue_with(snapshot, vec![reply]);
        handle
    }

    /// Queue a write whose outcome goes to handles created earlier.
    pub(crate) fn enqueue_with(&self, snapshot: Snapshot, replies: Vec<SaveReply>) {
        if self.tx.send(Message::Save { snapshot, replies }).is_err() {
            error!("Save queue writer is gone, snapshot not persisted");
        }
    }

    /// Wait until every save enqueued before this call has finished.
    pub async fn flush(&self) {
        let (done, rx) = oneshot::channel();
        if self.tx.send(Message::Flush(done)).is_ok() {
            let _ = rx.await;
        }
    }
}

/// Result channel for one queued save.
///
/// Await [`SaveHandle::wait`] to learn the outcome, or drop the handle to
/// detach. Dropping does not cancel the write.
#[derive(Debug)]
#[must_use = "drop the handle explicitly to detach from the save"]
pub struct SaveHandle {
    rx: oneshot::Receiver<SaveOutcome>,
}

impl SaveHandle {
    /// A handle not yet tied to a queued write.
    pub(crate) fn pending() -> (Self, SaveReply) {
        let (reply, rx) = oneshot::channel();
        (Self { rx }, reply)
    }

    pub async fn wait(self) -> Result<()> {
        match self.rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(DirectoryError::Persist(e)),
            Err(_) => Err(DirectoryError::Store("Save queue closed".to_string())),
        }
    }

    /// Detach from the save. The write still runs to completion.
    pub fn detach(self) {}
}

async fn run_writer<B: SlotBackend>(store: RecordStore<B>, mut rx: mpsc::UnboundedReceiver<Message>) {
    while let Some(first) = rx.recv().await {
        let mut latest: Option<Snapshot> = None;
        let mut replies = Vec::new();
        let mut flushes = Vec::new();

        let mut absorb = |msg: Message| match msg {
            Message::Save {
                snapshot,
                replies: mut waiting,
            } => {
                latest = Some(snapshot);
                replies.append(&mut waiting);
            }
            Message::Flush(done) => flushes.push(done),
        };

        absorb(first);
        while let Ok(msg) = rx.try_recv() {
            absorb(msg);
        }

        if let Some(snapshot) = latest {
            let outcome = store.save(&snapshot).await.map_err(Arc::new);
            match &outcome {
                Ok(()) => debug!(
                    slot = store.slot(),
                    count = snapshot.len(),
                    coalesced = replies.len(),
                    "Saved collection"
                ),
                Err(e) => error!(slot = store.slot(), error = %e, "Failed to save collection"),
            }
            for reply in replies {
                let _ = reply.send(outcome.clone());
            }
        }

        for done in flushes {
            let _ = done.send(());
        }
    }
    debug!(slot = store.slot(), "Save queue closed");
}
