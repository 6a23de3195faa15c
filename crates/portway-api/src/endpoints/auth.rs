// Authentication endpoints
//
// Login exchanges admin credentials for a bearer token; the token is
// stored on the client so subsequent admin calls carry it automatically.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::models::{LoginRequest, LoginResponse};

impl PortalClient {
    /// Authenticate as an admin and store the returned session token.
    ///
    /// `POST /api/auth/login`
    pub async fn login(&self, roll_no: &str, password: &SecretString) -> Result<SecretString, Error> {
        let url = self.api_url("auth/login");
        debug!(roll_no, "logging in");

        let req = LoginRequest {
            roll_no: roll_no.to_owned(),
            password: password.expose_secret().to_owned(),
        };
        let resp: LoginResponse = self.post_public(url, &req).await?;

        let token = SecretString::from(resp.token);
        self.set_token(token.clone());
        Ok(token)
    }

    /// End the admin session and drop the stored token. The local token
    /// is cleared even if the backend call fails.
    ///
    /// `POST /api/auth/logout`
    pub async fn logout(&self, roll_no: &str) -> Result<(), Error> {
        let url = self.api_url("auth/logout");
        debug!(roll_no, "logging out");

        let result: Result<serde_json::Value, Error> =
            self.post(url, &serde_json::json!({ "roll_no": roll_no })).await;
        self.clear_token();
        result.map(|_| ())
    }
}
