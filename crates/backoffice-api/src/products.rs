// Product endpoints
//
// Listing accepts the query pairs produced by the filter composer; bulk
// import takes a validated CSV/XLSX file as multipart.

use bytes::Bytes;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ImportReport, Product};

impl ApiClient {
    /// List products narrowed by `query` (`search`, `category_id`, ...).
    ///
    /// `GET /api/products/`
    pub async fn list_products(&self, query: &[(String, String)]) -> Result<Vec<Product>, Error> {
        debug!(filters = query.len(), "listing products");
        self.get("/api/products/", query).await
    }

    /// Upload a product import file.
    ///
    /// `POST /api/products/import` (multipart, field `file`)
    pub async fn import_products(
        &self,
        file_name: &str,
        contents: Bytes,
    ) -> Result<ImportReport, Error> {
        debug!(file_name, "importing products");
        let report: Option<ImportReport> = self
            .upload("/api/products/import", file_name, contents)
            .await?;
        Ok(report.unwrap_or_default())
    }
}
