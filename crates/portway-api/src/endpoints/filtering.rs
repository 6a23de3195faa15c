// Web-content filtering endpoints
//
// The manual block list and the named site categories share one payload;
// mutations are per-site (add/remove) or per-category (toggle).

use serde_json::json;
use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::models::{CategoryToggleResponse, FilteringResponse};

impl PortalClient {
    /// Fetch the manual block list and all site categories.
    ///
    /// `GET /api/admin/filtering`
    pub async fn filtering(&self) -> Result<FilteringResponse, Error> {
        let url = self.api_url("admin/filtering");
        debug!("fetching filtering state");
        self.get(url).await
    }

    /// Add a domain to the manual block list. The backend answers 409 if
    /// the domain is already manually blocked.
    ///
    /// `POST /api/admin/filtering/sites`
    pub async fn block_site(&self, domain: &str) -> Result<(), Error> {
        let url = self.api_url("admin/filtering/sites");
        debug!(domain, "adding manual block");
        let _: serde_json::Value = self.post(url, &json!({ "url": domain })).await?;
        Ok(())
    }

    /// Remove a domain from the manual block list.
    ///
    /// `DELETE /api/admin/filtering/sites`
    pub async fn unblock_site(&self, domain: &str) -> Result<(), Error> {
        let url = self.api_url("admin/filtering/sites");
        debug!(domain, "removing manual block");
        let _: serde_json::Value = self.delete(url, &json!({ "url": domain })).await?;
        Ok(())
    }

    /// Flip a category's active flag. Returns the new state.
    ///
    /// `POST /api/admin/filtering/categories`
    pub async fn toggle_category(&self, category: &str) -> Result<CategoryToggleResponse, Error> {
        let url = self.api_url("admin/filtering/categories");
        debug!(category, "toggling category");
        self.post(url, &json!({ "category": category })).await
    }
}
