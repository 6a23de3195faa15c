// Portal backend HTTP client
//
// Wraps `reqwest::Client` with portal-specific URL construction, bearer
// token injection, and status-code mapping. All endpoint groups
// (clients, filtering, logs, ...) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Some backend revisions wrap rejections as `{"message": "..."}`,
/// others as `{"error": "..."}`.
#[derive(serde::Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Raw HTTP client for the portal's admin REST surface.
///
/// Holds the base URL and the admin session token. Every admin request
/// carries `Authorization: Bearer <token>`; if no token is stored the
/// request is refused locally with [`Error::MissingToken`] before
/// anything goes on the wire.
pub struct PortalClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<SecretString>>,
}

impl PortalClient {
    /// Create a new client from a `TransportConfig`. No token is stored;
    /// call [`set_token`](Self::set_token) or [`login`](Self::login).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            token: RwLock::new(None),
        })
    }

    /// Create a client with a pre-built `reqwest::Client` (tests).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: RwLock::new(None),
        }
    }

    /// The portal base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Store a session token (from login or a persisted session).
    pub fn set_token(&self, token: SecretString) {
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    /// Drop the stored session token.
    pub fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    /// Whether a session token is currently stored.
    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Apply the stored bearer token, or refuse the request locally.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        let guard = self.token.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(token) => Ok(builder.bearer_auth(token.expose_secret())),
            None => Err(Error::MissingToken),
        }
    }

    /// Send an authenticated GET and decode the JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let builder = self.authorize(self.http.get(url))?;
        let resp = builder.send().await.map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// Send an authenticated POST with JSON body and decode the response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let builder = self.authorize(self.http.post(url).json(body))?;
        let resp = builder.send().await.map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// Send an authenticated PATCH with JSON body and decode the response.
    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PATCH {}", url);
        let builder = self.authorize(self.http.patch(url).json(body))?;
        let resp = builder.send().await.map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// Send an authenticated DELETE with JSON body and decode the response.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("DELETE {}", url);
        let builder = self.authorize(self.http.delete(url).json(body))?;
        let resp = builder.send().await.map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// Send an authenticated multipart POST (bulk upload).
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        form: reqwest::multipart::Form,
    ) -> Result<T, Error> {
        debug!("POST (multipart) {}", url);
        let builder = self.authorize(self.http.post(url).multipart(form))?;
        let resp = builder.send().await.map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// Send an *unauthenticated* POST (login only).
    pub(crate) async fn post_public<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// Map the response status and decode the JSON body.
    ///
    /// 401 → [`Error::Authentication`], 409 → [`Error::Conflict`] (the
    /// backend uses 409 for duplicate roll numbers and duplicate manual
    /// blocks), any other non-success → [`Error::Api`]. Success bodies
    /// that fail to decode carry a body preview for debugging.
    pub(crate) async fn parse_response<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiMessage>(&body)
                .ok()
                .and_then(|m| m.message.or(m.error))
                .unwrap_or_else(|| preview(&body).to_owned());

            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED => Error::Authentication {
                    message: if message.is_empty() {
                        "session expired or invalid credentials".into()
                    } else {
                        message
                    },
                },
                reqwest::StatusCode::CONFLICT => Error::Conflict { message },
                _ => Error::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}

/// First 200 characters of a body, for error messages.
fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((i, _)) => &body[..i],
        None => body,
    }
}
