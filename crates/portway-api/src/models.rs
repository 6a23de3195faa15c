// Wire models for the portal backend.
//
// Response fields use `#[serde(default)]` liberally because the backend
// is inconsistent about field presence across revisions. Client records
// in particular have shipped under several shapes (`roll_no` vs `name`,
// `data` vs `data_usage`, `_id` vs `id`), so they are surfaced as raw
// JSON maps and canonicalized downstream.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One client record exactly as the backend sent it.
///
/// Field naming varies across backend revisions; `portway-core`'s
/// normalizer resolves the aliases into a canonical record.
pub type RawClient = serde_json::Map<String, serde_json::Value>;

/// `GET /api/admin/clients`
#[derive(Debug, Default, Deserialize)]
pub struct ClientsResponse {
    #[serde(default)]
    pub clients: Vec<RawClient>,
}

/// `GET /api/admin/clients/{id}` — some revisions wrap the record in a
/// `client` key, others return it bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClientDetailResponse {
    Wrapped { client: RawClient },
    Bare(RawClient),
}

impl ClientDetailResponse {
    pub fn into_inner(self) -> RawClient {
        match self {
            Self::Wrapped { client } | Self::Bare(client) => client,
        }
    }
}

/// `POST /api/admin/clients`
#[derive(Debug, Clone, Serialize)]
pub struct AddClientRequest {
    pub roll_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
}

/// `PATCH /api/admin/clients/{id}` — partial update.
///
/// `bandwidth_limit` is string-or-number on the wire (tier token or
/// manual Mbps override), so it stays a `serde_json::Value` here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateClientRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_limit: Option<serde_json::Value>,
}

// ── Filtering ────────────────────────────────────────────────────────

/// One named category from the filtering payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub sites: Vec<String>,
}

/// `GET /api/admin/filtering`
#[derive(Debug, Default, Deserialize)]
pub struct FilteringResponse {
    #[serde(default)]
    pub manual_blocks: Vec<String>,
    #[serde(default)]
    pub categories: BTreeMap<String, RawCategory>,
}

/// `POST /api/admin/filtering/categories` response.
#[derive(Debug, Deserialize)]
pub struct CategoryToggleResponse {
    pub active: bool,
}

// ── Logs ─────────────────────────────────────────────────────────────

/// One activity log entry from `GET /api/admin/logs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLogEntry {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<RawLogEntry>,
}

// ── Stats ────────────────────────────────────────────────────────────

/// `GET /api/admin/stats` — the dashboard summary counters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub client_count: u64,
    #[serde(default)]
    pub total_data: f64,
    #[serde(default)]
    pub threats_blocked: u64,
}

// ── Reports ──────────────────────────────────────────────────────────

/// `POST /api/admin/reports`
#[derive(Debug, Clone, Serialize)]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub report_type: String,
    pub range: String,
}

/// Report payload: a header row plus data rows. Cells may be strings or
/// numbers depending on the report type.
#[derive(Debug, Default, Deserialize)]
pub struct ReportResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub data: Vec<Vec<serde_json::Value>>,
}

// ── Bulk upload ──────────────────────────────────────────────────────

/// `POST /api/admin/bulk-upload`
#[derive(Debug, Default, Deserialize)]
pub struct BulkUploadResponse {
    #[serde(default)]
    pub added: u32,
    #[serde(default)]
    pub skipped: u32,
    #[serde(default)]
    pub errors: Vec<String>,
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub roll_no: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
