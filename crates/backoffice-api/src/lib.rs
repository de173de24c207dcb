// backoffice-api: Async HTTP client for the backoffice admin backend

pub mod analytics;
pub mod categories;
pub mod chat;
pub mod client;
pub mod conversations;
pub mod error;
pub mod models;
pub mod products;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{
    AnalyticsSummary, Category, ChatRequest, ConversationUser, ImportReport, NewCategory, Product,
};
pub use transport::TransportConfig;
