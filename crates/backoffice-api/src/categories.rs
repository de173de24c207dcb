// Category endpoints
//
// The admin UI reads the summary listing (with derived product counts)
// rather than the bare resource list.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Category, NewCategory};

impl ApiClient {
    /// List categories with their derived counters.
    ///
    /// `GET /api/categories/summary`
    pub async fn list_category_summaries(&self) -> Result<Vec<Category>, Error> {
        debug!("listing category summaries");
        self.get("/api/categories/summary", &[] as &[(&str, &str)])
            .await
    }

    /// Create a category. The backend assigns the id.
    ///
    /// `POST /api/categories/` with `{"name": "..."}`
    pub async fn create_category(&self, name: &str) -> Result<Category, Error> {
        debug!(name, "creating category");
        self.post(
            "/api/categories/",
            &NewCategory {
                name: name.to_owned(),
            },
        )
        .await
    }

    /// Delete a category by id.
    ///
    /// `DELETE /api/categories/{id}` -- only the status matters.
    pub async fn delete_category(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting category");
        let _: serde_json::Value = self.delete(&format!("/api/categories/{id}")).await?;
        Ok(())
    }
}
