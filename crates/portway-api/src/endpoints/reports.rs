// Report generation endpoint

use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::models::{ReportRequest, ReportResponse};

impl PortalClient {
    /// Ask the backend to build a report over detection data.
    ///
    /// `POST /api/admin/reports`
    pub async fn generate_report(&self, req: &ReportRequest) -> Result<ReportResponse, Error> {
        let url = self.api_url("admin/reports");
        debug!(report_type = %req.report_type, range = %req.range, "generating report");
        self.post(url, req).await
    }
}
