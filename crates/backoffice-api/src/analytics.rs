// Analytics endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::AnalyticsSummary;

impl ApiClient {
    /// Fetch the dashboard summary.
    ///
    /// `GET /analytics/summary`
    pub async fn analytics_summary(&self) -> Result<AnalyticsSummary, Error> {
        debug!("fetching analytics summary");
        let summary: Option<AnalyticsSummary> = self
            .get("/analytics/summary", &[] as &[(&str, &str)])
            .await?;
        Ok(summary.unwrap_or_default())
    }
}
