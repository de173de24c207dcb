// ── Resource cache ──
//
// Collections fetched from the backend, held locally, and mutated only
// after the server confirms a change.

mod collection;

use std::fmt;
use std::future::Future;

use backoffice_api::{ApiClient, Category, Error as ApiError, NewCategory, Product};

pub use collection::ResourceCollection;

/// A server-owned item with a backend-assigned integer id.
///
/// `list` is the listing endpoint a collection of this type reloads from.
pub trait Resource: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;

    fn list(
        api: &ApiClient,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<Vec<Self>, ApiError>> + Send;
}

/// A resource the admin can create and delete.
pub trait Editable: Resource {
    /// Request body for creation; the backend assigns the id.
    type Draft: Send + Sync;

    fn create(
        api: &ApiClient,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Self, ApiError>> + Send;

    fn delete(api: &ApiClient, id: i64) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl Resource for Category {
    fn id(&self) -> i64 {
        self.id
    }

    // The summary listing takes no filters.
    fn list(
        api: &ApiClient,
        _query: &[(String, String)],
    ) -> impl Future<Output = Result<Vec<Self>, ApiError>> + Send {
        api.list_category_summaries()
    }
}

impl Editable for Category {
    type Draft = NewCategory;

    fn create(
        api: &ApiClient,
        draft: &NewCategory,
    ) -> impl Future<Output = Result<Self, ApiError>> + Send {
        api.create_category(&draft.name)
    }

    fn delete(api: &ApiClient, id: i64) -> impl Future<Output = Result<(), ApiError>> + Send {
        api.delete_category(id)
    }
}

impl Resource for Product {
    fn id(&self) -> i64 {
        self.id
    }

    fn list(
        api: &ApiClient,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<Vec<Self>, ApiError>> + Send {
        api.list_products(query)
    }
}

/// Fetch lifecycle of a collection.
///
/// `Idle → Loading → {Loaded | Failed}`; every fetch restarts the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The last fetch failed. The cached items are the last good ones.
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The user-facing error message of a failed fetch.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Loading => f.write_str("loading"),
            Self::Loaded => f.write_str("loaded"),
            Self::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// Category collection over the summary listing.
pub type CategoryStore = ResourceCollection<Category>;

/// Product collection; narrow it with `set_query`.
pub type ProductStore = ResourceCollection<Product>;
