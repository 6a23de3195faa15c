// ── Reports and CSV export ──
//
// Reports normally come from the backend (`POST /api/admin/reports`);
// the aggregation helpers below rebuild the same three shapes from the
// local snapshot when asked to work offline.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use portway_api::models::ReportResponse;

use super::client::Client;
use super::filtering::FilterTable;
use super::log::LogBuffer;

/// The three report shapes the product knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    TopBandwidthUsers,
    BlockedSiteActivity,
    FullNetworkAudit,
}

impl ReportType {
    /// The name the backend expects in the request body.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopBandwidthUsers => "Top Bandwidth Users",
            Self::BlockedSiteActivity => "Blocked Site Activity",
            Self::FullNetworkAudit => "Full Network Audit",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top-bandwidth-users" | "top bandwidth users" => Ok(Self::TopBandwidthUsers),
            "blocked-site-activity" | "blocked site activity" => Ok(Self::BlockedSiteActivity),
            "full-network-audit" | "full network audit" => Ok(Self::FullNetworkAudit),
            other => Err(format!(
                "unknown report type {other:?} (expected top-bandwidth-users, \
                 blocked-site-activity, or full-network-audit)"
            )),
        }
    }
}

/// Report time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRange {
    Daily,
    Weekly,
    Monthly,
}

impl ReportRange {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for ReportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!(
                "unknown range {other:?} (expected daily, weekly, or monthly)"
            )),
        }
    }
}

/// A rendered report: a header row plus string rows.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    /// Build from a backend response, stringifying mixed-type cells.
    pub fn from_response(resp: ReportResponse, fallback_title: String) -> Self {
        Self {
            title: resp.title.unwrap_or(fallback_title),
            headers: resp.headers,
            rows: resp
                .data
                .into_iter()
                .map(|row| row.iter().map(cell_to_string).collect())
                .collect(),
        }
    }

    /// Render as CSV: double-quoted cells, comma separators, CRLF line
    /// endings, header row first, embedded quotes doubled.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_csv_row(&mut out, &self.headers);
        for row in &self.rows {
            push_csv_row(&mut out, row);
        }
        out
    }

    /// Filename-friendly title (spaces to underscores).
    pub fn file_stem(&self) -> String {
        self.title.replace(' ', "_")
    }
}

fn push_csv_row(out: &mut String, cells: &[String]) {
    let quoted: Vec<String> = cells
        .iter()
        .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
        .collect();
    out.push_str(&quoted.join(","));
    out.push_str("\r\n");
}

fn cell_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ── Local aggregation (offline fallback) ────────────────────────────

/// Top five clients by cumulative usage, admin records excluded.
pub fn top_bandwidth_users(clients: &[Client]) -> Report {
    let mut ranked: Vec<&Client> = clients.iter().filter(|c| !c.is_admin()).collect();
    ranked.sort_by(|a, b| {
        b.data_usage_gb
            .partial_cmp(&a.data_usage_gb)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Report {
        title: "Top Bandwidth Users".into(),
        headers: vec![
            "Rank".into(),
            "Client".into(),
            "Device".into(),
            "Data Used (GB)".into(),
        ],
        rows: ranked
            .iter()
            .take(5)
            .enumerate()
            .map(|(idx, c)| {
                vec![
                    format!("#{}", idx + 1),
                    c.display_name.clone(),
                    c.device.clone().unwrap_or_else(|| "-".into()),
                    format!("{} GB", c.data_usage_gb),
                ]
            })
            .collect(),
    }
}

/// The effective blocklist with category attribution.
pub fn blocked_site_activity(filter: &FilterTable) -> Report {
    Report {
        title: "Blocked Site Activity".into(),
        headers: vec!["Website".into(), "Category".into()],
        rows: filter
            .effective_blocklist()
            .into_iter()
            .map(|site| {
                let category = filter
                    .attribution(&site.domain)
                    .unwrap_or("Manual")
                    .to_owned();
                vec![site.domain, category]
            })
            .collect(),
    }
}

/// The newest twenty audit entries.
pub fn network_audit(logs: &LogBuffer) -> Report {
    Report {
        title: "Full Network Audit".into(),
        headers: vec!["Time".into(), "Level".into(), "User".into(), "Action".into()],
        rows: logs
            .entries()
            .into_iter()
            .take(20)
            .map(|e| {
                vec![
                    e.time,
                    e.level.to_string().to_uppercase(),
                    e.user,
                    e.action,
                ]
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::log::{LogEntry, LogLevel};

    fn client(name: &str, gb: f64, admin: bool) -> Client {
        Client {
            id: name.to_owned(),
            display_name: name.to_owned(),
            device: Some("Laptop".into()),
            ip: None,
            data_usage_gb: gb,
            activity: "Idle".into(),
            blocked: false,
            status: None,
            bandwidth_limit: None,
            role: admin.then(|| "admin".to_owned()),
        }
    }

    #[test]
    fn csv_format_is_byte_exact() {
        let report = Report {
            title: "T".into(),
            headers: vec!["A".into(), "B".into()],
            rows: vec![vec!["x".into(), "y,z".into()]],
        };
        assert_eq!(report.to_csv(), "\"A\",\"B\"\r\n\"x\",\"y,z\"\r\n");
    }

    #[test]
    fn csv_doubles_embedded_quotes() {
        let report = Report {
            title: "T".into(),
            headers: vec!["H".into()],
            rows: vec![vec!["say \"hi\"".into()]],
        };
        assert_eq!(report.to_csv(), "\"H\"\r\n\"say \"\"hi\"\"\"\r\n");
    }

    #[test]
    fn top_users_sorts_descending_and_skips_admins() {
        let clients = vec![
            client("A", 1.0, false),
            client("ADMIN", 99.0, true),
            client("B", 15.8, false),
            client("C", 4.2, false),
        ];
        let report = top_bandwidth_users(&clients);
        let names: Vec<&str> = report.rows.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
        assert_eq!(report.rows[0][0], "#1");
    }

    #[test]
    fn top_users_caps_at_five() {
        let clients: Vec<Client> = (0..8)
            .map(|n| client(&format!("c{n}"), f64::from(n), false))
            .collect();
        assert_eq!(top_bandwidth_users(&clients).rows.len(), 5);
    }

    #[test]
    fn audit_report_takes_the_newest_twenty() {
        let mut logs = LogBuffer::default();
        for n in 0..30 {
            logs.push(LogEntry::now(LogLevel::Info, "ADMIN", format!("action {n}")));
        }
        let report = network_audit(&logs);
        assert_eq!(report.rows.len(), 20);
        assert_eq!(report.rows[0][3], "action 29");
    }

    #[test]
    fn mixed_cells_stringify() {
        let resp = ReportResponse {
            title: None,
            headers: vec!["W".into(), "N".into()],
            data: vec![vec![serde_json::json!("site"), serde_json::json!(412)]],
        };
        let report = Report::from_response(resp, "Fallback".into());
        assert_eq!(report.title, "Fallback");
        assert_eq!(report.rows[0], vec!["site".to_owned(), "412".to_owned()]);
    }
}
