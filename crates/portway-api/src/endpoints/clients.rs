// Managed-client endpoints
//
// Listing, creation, and partial update (identity, credential, blocked
// flag, bandwidth limit). Clients are never deleted through this surface.

use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::models::{
    AddClientRequest, ClientDetailResponse, ClientsResponse, RawClient, UpdateClientRequest,
};

impl PortalClient {
    /// List all managed clients.
    ///
    /// `GET /api/admin/clients`
    pub async fn list_clients(&self) -> Result<Vec<RawClient>, Error> {
        let url = self.api_url("admin/clients");
        debug!("listing managed clients");
        let resp: ClientsResponse = self.get(url).await?;
        Ok(resp.clients)
    }

    /// Fetch a single client by id.
    ///
    /// `GET /api/admin/clients/{id}`
    pub async fn get_client(&self, id: &str) -> Result<RawClient, Error> {
        let url = self.api_url(&format!("admin/clients/{id}"));
        debug!(id, "fetching client");
        let resp: ClientDetailResponse = self.get(url).await?;
        Ok(resp.into_inner())
    }

    /// Register a new client. The backend answers 409 if the roll number
    /// is already taken.
    ///
    /// `POST /api/admin/clients`
    pub async fn add_client(&self, req: &AddClientRequest) -> Result<(), Error> {
        let url = self.api_url("admin/clients");
        debug!(roll_no = %req.roll_no, "adding client");
        let _: serde_json::Value = self.post(url, req).await?;
        Ok(())
    }

    /// Partially update a client (identity, password, blocked flag,
    /// bandwidth limit).
    ///
    /// `PATCH /api/admin/clients/{id}`
    pub async fn update_client(&self, id: &str, req: &UpdateClientRequest) -> Result<(), Error> {
        let url = self.api_url(&format!("admin/clients/{id}"));
        debug!(id, "updating client");
        let _: serde_json::Value = self.patch(url, req).await?;
        Ok(())
    }
}
