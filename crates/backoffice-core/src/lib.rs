//! Client-side data layer between `backoffice-api` and UI consumers.
//!
//! This crate owns the state that an admin console keeps on the client:
//!
//! - **[`ResourceCollection`]**: A locally cached, ordered collection
//!   (categories, filtered products) with `fetch` / `create` / `remove`.
//!   The cache only changes after the backend confirms a request; a failed
//!   fetch keeps the last good items and records a message in
//!   [`LoadState::Failed`].
//!
//! - **[`CollectionStream<T>`]**: Subscription handle vended by a
//!   collection. Exposes `current()` / `latest()` / `changed()` for
//!   reactive rendering, and `settled()` to wait out an in-flight fetch.
//!
//! - **[`FilterComposer`]**: Reducer over [`FilterState`] that republishes
//!   the complete state on every edit.
//!
//! - **[`ImportSession`]**: Extension and size gate for bulk-import files,
//!   with retry-friendly upload and a locally generated CSV template.
//!
//! - **[`PreferenceStore`]** / **[`HydrationGate`]**: Theme and language
//!   state passed explicitly to consumers, plus the one-way
//!   `Bootstrapping → Ready` lifecycle that keeps the first paint stable.

pub mod document;
pub mod error;
pub mod filter;
pub mod hydration;
pub mod import;
pub mod prefs;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use document::{DocumentAttributes, DocumentSink, TextDirection, reconcile};
pub use error::CoreError;
pub use filter::{FilterChange, FilterComposer, FilterState};
pub use hydration::{HydrationGate, Phase, ShellLayout, ShellView};
pub use import::{ImportCandidate, ImportError, ImportSession};
pub use prefs::{Language, PreferenceBackend, PreferenceStore, Preferences, Theme};
pub use store::{CategoryStore, Editable, LoadState, ProductStore, Resource, ResourceCollection};
pub use stream::CollectionStream;

// Re-export wire types used in public signatures.
pub use backoffice_api::{
    AnalyticsSummary, ApiClient, Category, ConversationUser, ImportReport, NewCategory, Product,
    TransportConfig,
};
