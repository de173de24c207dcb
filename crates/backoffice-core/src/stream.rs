// ── Collection subscriptions ──
//
// A consumer's view of one collection: the items it last rendered, plus
// the load state so it can tell a settled listing from one mid-fetch.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::{LoadState, Resource};

type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// Subscription handle vended by
/// [`ResourceCollection::subscribe`](crate::ResourceCollection::subscribe).
pub struct CollectionStream<T: Resource> {
    current: Snapshot<T>,
    items: watch::Receiver<Snapshot<T>>,
    state: watch::Receiver<LoadState>,
}

impl<T: Resource> CollectionStream<T> {
    pub(crate) fn new(items: watch::Receiver<Snapshot<T>>, state: watch::Receiver<LoadState>) -> Self {
        let current = items.borrow().clone();
        Self {
            current,
            items,
            state,
        }
    }

    /// Items as of subscription, or as of the last `changed()` / `settled()`.
    pub fn current(&self) -> &Snapshot<T> {
        &self.current
    }

    /// Items right now, without marking them seen.
    pub fn latest(&self) -> Snapshot<T> {
        self.items.borrow().clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Wait for the items to change. `None` once the collection is gone.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.items.changed().await.ok()?;
        self.current = self.items.borrow_and_update().clone();
        Some(Arc::clone(&self.current))
    }

    /// Wait until no fetch is in flight and the collection is either
    /// `Loaded` or `Failed`, then take the items as current.
    ///
    /// Resolves at once if it already is. `None` once the collection is gone.
    pub async fn settled(&mut self) -> Option<LoadState> {
        let state = self
            .state
            .wait_for(|s| matches!(s, LoadState::Loaded | LoadState::Failed(_)))
            .await
            .ok()?
            .clone();
        self.current = self.items.borrow_and_update().clone();
        Some(state)
    }

    /// Item snapshots as a `Stream`: the current one first, then one per
    /// change. Load-state transitions are not part of the stream.
    pub fn into_stream(self) -> WatchStream<Snapshot<T>> {
        WatchStream::new(self.items)
    }
}
