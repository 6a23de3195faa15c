// Dashboard summary endpoint

use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::models::StatsResponse;

impl PortalClient {
    /// Fetch the dashboard summary counters.
    ///
    /// `GET /api/admin/stats`
    pub async fn stats(&self) -> Result<StatsResponse, Error> {
        let url = self.api_url("admin/stats");
        debug!("fetching summary stats");
        self.get(url).await
    }
}
