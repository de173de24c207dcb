// ── Generic reactive resource collection ──
//
// Ordered cache of server items with push-based change notification via
// `watch` channels. The cache only changes inside the success branch of a
// network call; a failed request never touches it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use backoffice_api::{ApiClient, Category, Product};
use indexmap::IndexMap;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{Editable, LoadState, Resource};
use crate::error::CoreError;
use crate::stream::CollectionStream;

/// A named, locally cached collection with CRUD against the backend.
///
/// Snapshots are `Arc<Vec<Arc<T>>>` in server listing order, unique by id.
/// Mutations apply only after the backend confirms them; concurrent
/// creates land in completion order, not call order.
pub struct ResourceCollection<T: Resource> {
    api: ApiClient,
    label: &'static str,

    /// Query pairs sent with every fetch.
    query: watch::Sender<Vec<(String, String)>>,

    /// Current items, rebuilt on every mutation.
    items: watch::Sender<Arc<Vec<Arc<T>>>>,

    state: watch::Sender<LoadState>,

    /// Bumped when a fetch starts.
    issued: AtomicU64,

    /// Highest generation whose response reached the cache. A response
    /// older than this is stale; an abandoned fetch never advances it.
    applied: AtomicU64,
}

impl<T: Resource> ResourceCollection<T> {
    pub fn new(api: ApiClient, label: &'static str) -> Self {
        let (query, _) = watch::channel(Vec::new());
        let (items, _) = watch::channel(Arc::new(Vec::new()));
        let (state, _) = watch::channel(LoadState::Idle);

        Self {
            api,
            label,
            query,
            items,
            state,
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    // ── Network-backed operations ────────────────────────────────────

    /// Reload the whole collection from the backend.
    ///
    /// On success the cache is replaced wholesale with the response. On
    /// failure the state becomes `Failed` with a user-facing message and
    /// the previous items stay available. Never returns an error.
    ///
    /// When fetches overlap, a response that arrives after a newer one was
    /// applied is dropped. A fetch cancelled before completing leaves the
    /// field to whichever older fetch is still running.
    pub async fn fetch(&self) {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(LoadState::Loading);

        let query = self.query.borrow().clone();
        debug!(collection = self.label, generation, "fetching");

        let result = T::list(&self.api, &query).await;

        if self.applied.fetch_max(generation, Ordering::SeqCst) >= generation {
            debug!(collection = self.label, generation, "discarding superseded fetch");
            return;
        }

        match result {
            Ok(payload) => {
                let items = dedupe(payload);
                info!(collection = self.label, count = items.len(), "collection loaded");
                self.items.send_replace(Arc::new(items));
                self.state.send_replace(LoadState::Loaded);
            }
            Err(err) => {
                let err = CoreError::from(err);
                warn!(collection = self.label, error = %err, "fetch failed, keeping cached items");
                self.state
                    .send_replace(LoadState::Failed(format!("Failed to load {}: {err}", self.label)));
            }
        }
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Replace the query pairs used by subsequent fetches.
    ///
    /// Does not fetch; the caller decides when to reload.
    pub fn set_query(&self, query: Vec<(String, String)>) {
        self.query.send_replace(query);
    }

    pub fn query(&self) -> Vec<(String, String)> {
        self.query.borrow().clone()
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    /// Get the current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.items.borrow().clone()
    }

    pub fn get(&self, id: i64) -> Option<Arc<T>> {
        self.items
            .borrow()
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Message of the last failed fetch, cleared when a new fetch starts.
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error().map(str::to_owned)
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Subscribe to item changes and load-state transitions.
    pub fn subscribe(&self) -> CollectionStream<T> {
        CollectionStream::new(self.items.subscribe(), self.state.subscribe())
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn mutation_error(&self, operation: &'static str, err: backoffice_api::Error) -> CoreError {
        let err = CoreError::from(err);
        warn!(collection = self.label, operation, error = %err, "mutation failed, cache unchanged");
        err
    }
}

impl<T: Editable> ResourceCollection<T> {
    /// Create an item and append the server's version once confirmed.
    ///
    /// If the returned id is already cached the entry is replaced in place.
    pub async fn create(&self, draft: &T::Draft) -> Result<Arc<T>, CoreError> {
        let created = T::create(&self.api, draft)
            .await
            .map_err(|e| self.mutation_error("create", e))?;

        let created = Arc::new(created);
        let id = created.id();
        self.items.send_modify(|items| {
            let list = Arc::make_mut(items);
            match list.iter_mut().find(|existing| existing.id() == id) {
                Some(slot) => *slot = Arc::clone(&created),
                None => list.push(Arc::clone(&created)),
            }
        });

        info!(collection = self.label, id, "item created");
        Ok(created)
    }

    /// Delete an item and drop it from the cache once confirmed.
    pub async fn remove(&self, id: i64) -> Result<(), CoreError> {
        T::delete(&self.api, id)
            .await
            .map_err(|e| self.mutation_error("remove", e))?;

        let removed = self.items.send_if_modified(|items| {
            let before = items.len();
            Arc::make_mut(items).retain(|item| item.id() != id);
            items.len() != before
        });

        info!(collection = self.label, id, removed, "item removed");
        Ok(())
    }
}

impl ResourceCollection<Category> {
    /// Category collection over the summary listing.
    pub fn categories(api: ApiClient) -> Self {
        Self::new(api, "categories")
    }
}

impl ResourceCollection<Product> {
    /// Product collection; narrow it with [`set_query`](Self::set_query).
    pub fn products(api: ApiClient) -> Self {
        Self::new(api, "products")
    }
}

/// Keep the first occurrence of each id, preserving payload order.
fn dedupe<T: Resource>(payload: Vec<T>) -> Vec<Arc<T>> {
    let mut by_id: IndexMap<i64, Arc<T>> = IndexMap::with_capacity(payload.len());
    for item in payload {
        let id = item.id();
        by_id.entry(id).or_insert_with(|| Arc::new(item));
    }
    by_id.into_values().collect()
}
