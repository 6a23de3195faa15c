// Activity log endpoint

use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::models::{LogsResponse, RawLogEntry};

impl PortalClient {
    /// Fetch the network activity log, newest first.
    ///
    /// `GET /api/admin/logs`
    pub async fn list_logs(&self) -> Result<Vec<RawLogEntry>, Error> {
        let url = self.api_url("admin/logs");
        debug!("fetching activity logs");
        let resp: LogsResponse = self.get(url).await?;
        Ok(resp.logs)
    }
}
