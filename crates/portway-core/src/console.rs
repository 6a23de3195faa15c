// ── Console facade ──
//
// Ties the API client and the application state together. Reads fill
// the state from the backend; mutations go through `execute`, which
// sends exactly one request (or none, for ledger-local commands),
// records exactly one audit entry, and hands back the refresh plan.
//
// Mutations are never applied optimistically: local state changes only
// after the backend confirms, and a failed request leaves it untouched.

use tracing::{debug, warn};

use portway_api::models::{AddClientRequest, BulkUploadResponse, ReportRequest, UpdateClientRequest};
use portway_api::PortalClient;

use crate::command::{Applied, Command};
use crate::error::CoreError;
use crate::model::log::{LogEntry, LogLevel};
use crate::model::report::{self, Report, ReportRange, ReportType};
use crate::model::FilterTable;
use crate::normalize;
use crate::refresh::{MountedViews, Mutation, RefreshPlan, View};
use crate::state::{AppState, Summary};

/// Actor name recorded on administrative audit entries.
const ADMIN_ACTOR: &str = "ADMIN";
/// Actor name recorded when a guest claims a voucher.
const GUEST_ACTOR: &str = "GUEST";

/// The main entry point for UI consumers.
pub struct Console {
    api: PortalClient,
    state: AppState,
}

impl Console {
    pub fn new(api: PortalClient) -> Self {
        Self {
            api,
            state: AppState::new(),
        }
    }

    /// Build with pre-seeded state (tests, ledger restore).
    pub fn with_state(api: PortalClient, state: AppState) -> Self {
        Self { api, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn api(&self) -> &PortalClient {
        &self.api
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch and canonicalize the client listing. Returns how many
    /// records survived normalization.
    pub async fn refresh_clients(&self) -> Result<usize, CoreError> {
        let raw = self.api.list_clients().await?;
        let fetched = raw.len();
        let clients = normalize::normalize_all(raw);
        if clients.len() < fetched {
            debug!(
                dropped = fetched - clients.len(),
                "some client records were skipped during normalization"
            );
        }
        let count = clients.len();
        self.state.clients.replace_all(clients);
        self.state.recount_active();
        Ok(count)
    }

    /// Fetch the filtering state.
    pub async fn refresh_filtering(&self) -> Result<(), CoreError> {
        let resp = self.api.filtering().await?;
        self.state.set_filter(FilterTable::from_response(resp));
        Ok(())
    }

    /// Fetch the activity log into the bounded ring.
    pub async fn refresh_logs(&self) -> Result<(), CoreError> {
        let raw = self.api.list_logs().await?;
        self.state
            .replace_logs(raw.into_iter().map(LogEntry::from_raw));
        Ok(())
    }

    /// Fetch the dashboard counters, then reconcile the active count
    /// with the local directory when one is loaded.
    pub async fn refresh_summary(&self) -> Result<Summary, CoreError> {
        let stats = self.api.stats().await?;
        self.state.set_summary(Summary {
            active_clients: stats.client_count,
            total_data_gb: stats.total_data,
            threats_blocked: stats.threats_blocked,
        });
        if !self.state.clients.is_empty() {
            self.state.recount_active();
        }
        Ok(self.state.summary())
    }

    /// Re-fetch the data behind one section.
    pub async fn refresh_view(&self, view: View) -> Result<(), CoreError> {
        match view {
            View::Dashboard => {
                self.refresh_summary().await?;
            }
            View::Clients | View::Bandwidth => {
                self.refresh_clients().await?;
            }
            View::WebFiltering => self.refresh_filtering().await?,
            View::Logs => self.refresh_logs().await?,
            // Vouchers and reports have no backend feed to re-pull.
            View::GuestNetwork | View::Reporting => {}
        }
        Ok(())
    }

    /// Apply a refresh plan. Sections fail in isolation: one broken
    /// fetch never takes down the others, and the failures come back
    /// for the UI to show per-section placeholders.
    pub async fn apply_plan(&self, plan: &RefreshPlan) -> Vec<(View, CoreError)> {
        let mut failures = Vec::new();
        for &view in &plan.views {
            if let Err(e) = self.refresh_view(view).await {
                warn!(?view, error = %e, "section refresh failed");
                failures.push((view, e));
            }
        }
        failures
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Execute one command: at most one backend request, exactly one
    /// audit entry, and a refresh plan for the mounted sections.
    ///
    /// Confirmation gating happens *before* this call; see
    /// [`Command::confirmation_prompt`].
    #[allow(clippy::too_many_lines, clippy::cognitive_complexity)]
    pub async fn execute(
        &self,
        cmd: Command,
        mounted: &MountedViews,
    ) -> Result<Applied, CoreError> {
        let mutation = cmd.mutation();
        let log = match cmd {
            Command::AddClient {
                roll_no,
                password,
                activity,
            } => {
                let roll_no = required(&roll_no, "roll_no")?;
                self.api
                    .add_client(&AddClientRequest {
                        roll_no: roll_no.clone(),
                        password,
                        activity,
                    })
                    .await?;
                self.state
                    .record(LogLevel::Info, ADMIN_ACTOR, format!("Registered client {roll_no}"))
            }

            Command::EditClient {
                id,
                roll_no,
                password,
            } => {
                let roll_no = required(&roll_no, "roll_no")?;
                self.api
                    .update_client(
                        &id,
                        &UpdateClientRequest {
                            roll_no: Some(roll_no.clone()),
                            password,
                            ..UpdateClientRequest::default()
                        },
                    )
                    .await?;
                self.state
                    .record(LogLevel::Info, ADMIN_ACTOR, format!("Updated client {roll_no}"))
            }

            Command::SetBlocked {
                id,
                display_name,
                blocked,
            } => {
                self.api
                    .update_client(
                        &id,
                        &UpdateClientRequest {
                            blocked: Some(blocked),
                            ..UpdateClientRequest::default()
                        },
                    )
                    .await?;
                // Mirror the confirmed flag locally so the recount is
                // right even before the next listing fetch.
                if let Some(existing) = self.state.clients.get(&id) {
                    let mut updated = (*existing).clone();
                    updated.blocked = blocked;
                    self.state.clients.upsert(updated);
                }
                if blocked {
                    self.state
                        .record(LogLevel::Warn, ADMIN_ACTOR, format!("Blocked user {display_name}"))
                } else {
                    self.state
                        .record(LogLevel::Info, ADMIN_ACTOR, format!("Unblocked user {display_name}"))
                }
            }

            Command::SetBandwidth { id, limit } => {
                self.api
                    .update_client(
                        &id,
                        &UpdateClientRequest {
                            bandwidth_limit: Some(limit.to_wire()),
                            ..UpdateClientRequest::default()
                        },
                    )
                    .await?;
                self.state
                    .record(LogLevel::Info, ADMIN_ACTOR, format!("Set bandwidth limit to {limit}"))
            }

            Command::BlockSite { domain } => {
                let domain = required(&domain, "url")?;
                self.api.block_site(&domain).await?;
                self.state.record(
                    LogLevel::Warn,
                    ADMIN_ACTOR,
                    format!("Manually blocked site: {domain}"),
                )
            }

            Command::UnblockSite { domain } => {
                // The guard runs before any request: a category-covered
                // site is rejected with the category named.
                self.state.filter().check_removable(&domain)?;
                self.api.unblock_site(&domain).await?;
                self.state.record(
                    LogLevel::Info,
                    ADMIN_ACTOR,
                    format!("Removed {domain} from block list"),
                )
            }

            Command::ToggleCategory { name } => {
                let resp = self.api.toggle_category(&name).await?;
                // Keep the local table in step; a stale table just means
                // the next filtering fetch resolves it.
                let _ = self
                    .state
                    .with_filter_mut(|t| t.set_category_active(&name, resp.active));
                if resp.active {
                    self.state.record(
                        LogLevel::Warn,
                        ADMIN_ACTOR,
                        format!("Enabled category block: {name}"),
                    )
                } else {
                    self.state.record(
                        LogLevel::Info,
                        ADMIN_ACTOR,
                        format!("Disabled category block: {name}"),
                    )
                }
            }

            Command::CreateVoucher { code, duration } => {
                let code = required(&code, "code")?;
                self.state
                    .with_vouchers_mut(|l| l.create(code.clone(), duration).id);
                self.state
                    .record(LogLevel::Info, ADMIN_ACTOR, format!("Created new voucher: {code}"))
            }

            Command::GenerateVouchers { count } => {
                self.state.with_vouchers_mut(|l| l.generate(count));
                self.state.record(
                    LogLevel::Info,
                    ADMIN_ACTOR,
                    format!("Generated {count} new guest vouchers"),
                )
            }

            Command::ClaimVoucher { id, by } => {
                let code = self
                    .state
                    .with_vouchers_mut(|l| l.claim(id, by).map(|v| v.code.clone()))?;
                self.state
                    .record(LogLevel::Info, GUEST_ACTOR, format!("Voucher {code} was claimed."))
            }

            Command::DeleteVoucher { id } => {
                let voucher = self.state.with_vouchers_mut(|l| l.delete(id))?;
                self.state.record(
                    LogLevel::Info,
                    ADMIN_ACTOR,
                    format!("Deleted voucher {}", voucher.code),
                )
            }

            Command::SetGuestNetwork { enabled } => {
                self.state.with_vouchers_mut(|l| l.guest_enabled = enabled);
                if enabled {
                    self.state
                        .record(LogLevel::Info, ADMIN_ACTOR, "Guest Network Enabled")
                } else {
                    self.state
                        .record(LogLevel::Warn, ADMIN_ACTOR, "Guest Network Disabled")
                }
            }
        };

        self.state.recount_active();
        let plan = RefreshPlan::for_mutation(mutation, log.level, mounted);
        Ok(Applied {
            mutation,
            log,
            plan,
        })
    }

    // ── Reports ──────────────────────────────────────────────────────

    /// Build a report, server-side by default or from the local
    /// snapshot when offline. Generation is itself an auditable action.
    pub async fn generate_report(
        &self,
        report_type: ReportType,
        range: ReportRange,
        offline: bool,
        mounted: &MountedViews,
    ) -> Result<(Report, Applied), CoreError> {
        let report = if offline {
            match report_type {
                ReportType::TopBandwidthUsers => {
                    let snapshot = self.state.clients.snapshot();
                    let clients: Vec<_> = snapshot.iter().map(|c| (**c).clone()).collect();
                    report::top_bandwidth_users(&clients)
                }
                ReportType::BlockedSiteActivity => {
                    report::blocked_site_activity(&self.state.filter())
                }
                ReportType::FullNetworkAudit => {
                    let mut buf = crate::model::log::LogBuffer::default();
                    buf.replace_all(self.state.logs());
                    report::network_audit(&buf)
                }
            }
        } else {
            let resp = self
                .api
                .generate_report(&ReportRequest {
                    report_type: report_type.as_str().to_owned(),
                    range: range.as_str().to_owned(),
                })
                .await?;
            Report::from_response(resp, format!("{range} {report_type} Report"))
        };

        let log = self.state.record(
            LogLevel::Info,
            ADMIN_ACTOR,
            format!("Generated report: {}", report.title),
        );
        let plan = RefreshPlan::for_mutation(Mutation::ReportGenerate, log.level, mounted);
        Ok((
            report,
            Applied {
                mutation: Mutation::ReportGenerate,
                log,
                plan,
            },
        ))
    }

    // ── Bulk import ──────────────────────────────────────────────────

    /// Upload a CSV of clients and record the outcome.
    pub async fn import_clients(
        &self,
        file_name: &str,
        contents: Vec<u8>,
        mounted: &MountedViews,
    ) -> Result<(BulkUploadResponse, Applied), CoreError> {
        let resp = self.api.bulk_upload(file_name, contents).await?;
        let log = self.state.record(
            LogLevel::Info,
            ADMIN_ACTOR,
            format!("Imported clients: {} added, {} skipped", resp.added, resp.skipped),
        );
        let plan = RefreshPlan::for_mutation(Mutation::BulkImport, log.level, mounted);
        Ok((
            resp,
            Applied {
                mutation: Mutation::BulkImport,
                log,
                plan,
            },
        ))
    }
}

/// Reject empty required input before anything goes on the wire.
fn required(value: &str, field: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation {
            field: field.to_owned(),
            reason: "must not be empty".into(),
        });
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::model::bandwidth::{BandwidthLimit, TierChoice, apply_edit, resolve_display};
    use crate::refresh::View;

    async fn console(server: &MockServer) -> Console {
        let base = url::Url::parse(&server.uri()).expect("mock url");
        let api = PortalClient::with_client(reqwest::Client::new(), base);
        api.set_token("test-token".to_string().into());
        Console::new(api)
    }

    fn all_mounted() -> MountedViews {
        MountedViews::new([
            View::Dashboard,
            View::Clients,
            View::Bandwidth,
            View::Logs,
            View::WebFiltering,
            View::GuestNetwork,
        ])
    }

    #[tokio::test]
    async fn confirmed_block_mutates_logs_and_decrements_active_count() {
        let server = MockServer::start().await;
        let console = console(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/admin/clients"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "clients": [{ "_id": "c1", "roll_no": "23203A0024", "blocked": false }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/admin/clients/c1"))
            .and(body_json(json!({ "blocked": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        console.refresh_clients().await.expect("listing");
        assert_eq!(console.state().summary().active_clients, 1);

        let applied = console
            .execute(
                Command::SetBlocked {
                    id: "c1".into(),
                    display_name: "23203A0024".into(),
                    blocked: true,
                },
                &all_mounted(),
            )
            .await
            .expect("block");

        // One warn-level audit entry, notification feed refreshed.
        assert_eq!(applied.log.level, LogLevel::Warn);
        assert!(applied.log.action.contains("Blocked user 23203A0024"));
        assert!(applied.plan.refresh_notifications);
        assert!(applied.plan.views.contains(&View::Clients));
        assert!(applied.plan.views.contains(&View::Bandwidth));

        // Active count decremented without waiting for a re-fetch.
        assert_eq!(console.state().summary().active_clients, 0);
        assert_eq!(console.state().notifications().len(), 1);
    }

    #[tokio::test]
    async fn failed_mutation_leaves_local_state_untouched() {
        let server = MockServer::start().await;
        let console = console(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/admin/clients"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "clients": [{ "_id": "c1", "roll_no": "23203A0024", "blocked": false }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/admin/clients/c1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        console.refresh_clients().await.expect("listing");
        let result = console
            .execute(
                Command::SetBlocked {
                    id: "c1".into(),
                    display_name: "23203A0024".into(),
                    blocked: true,
                },
                &all_mounted(),
            )
            .await;

        assert!(result.is_err());
        let client = console.state().clients.get("c1").expect("still present");
        assert!(!client.blocked);
        assert!(console.state().logs().is_empty());
    }

    #[tokio::test]
    async fn custom_bandwidth_edit_persists_the_integer_and_round_trips() {
        let server = MockServer::start().await;
        let console = console(&server).await;

        Mock::given(method("PATCH"))
            .and(path("/api/admin/clients/c1"))
            .and(body_json(json!({ "bandwidth_limit": 75 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let limit = apply_edit(TierChoice::Custom, Some("75")).expect("valid input");
        let applied = console
            .execute(
                Command::SetBandwidth {
                    id: "c1".into(),
                    limit,
                },
                &all_mounted(),
            )
            .await
            .expect("bandwidth edit");

        assert_eq!(applied.log.level, LogLevel::Info);
        assert!(applied.log.action.contains("75 Mbps"));

        // What the selector would now show: custom, field visible, 75.
        let sel = resolve_display(Some(BandwidthLimit::ManualMbps(75)));
        assert!(sel.is_manual());
        assert_eq!(sel.manual_mbps, Some(75));
    }

    #[tokio::test]
    async fn invalid_manual_input_sends_no_request() {
        // apply_edit rejects before a Command can be built, so an
        // unmocked server never sees traffic.
        assert!(apply_edit(TierChoice::Custom, Some("-3")).is_err());
        assert!(apply_edit(TierChoice::Custom, Some("fast")).is_err());
    }

    #[tokio::test]
    async fn category_covered_site_removal_is_rejected_before_any_request() {
        let server = MockServer::start().await;
        let console = console(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/admin/filtering"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "manual_blocks": ["twitch.tv"],
                "categories": {
                    "Gaming": { "active": true, "sites": ["twitch.tv"] }
                }
            })))
            .mount(&server)
            .await;
        // No DELETE mock: if the request went out the test would fail
        // with a transport error rather than CategoryCovered.

        console.refresh_filtering().await.expect("filtering");
        let result = console
            .execute(
                Command::UnblockSite {
                    domain: "twitch.tv".into(),
                },
                &all_mounted(),
            )
            .await;

        assert!(matches!(result, Err(CoreError::CategoryCovered { .. })));
        // The site is still listed.
        assert!(
            console
                .state()
                .filter()
                .effective_blocklist()
                .iter()
                .any(|s| s.domain == "twitch.tv")
        );
    }

    #[tokio::test]
    async fn category_toggle_updates_local_state_and_log_level() {
        let server = MockServer::start().await;
        let console = console(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/admin/filtering"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "manual_blocks": [],
                "categories": { "Gaming": { "active": false, "sites": ["twitch.tv"] } }
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/admin/filtering/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "active": true })))
            .mount(&server)
            .await;

        console.refresh_filtering().await.expect("filtering");
        let applied = console
            .execute(
                Command::ToggleCategory {
                    name: "Gaming".into(),
                },
                &all_mounted(),
            )
            .await
            .expect("toggle");

        // Enabling a block is notable; the local table follows the
        // backend's answer.
        assert_eq!(applied.log.level, LogLevel::Warn);
        assert!(console.state().filter().category("Gaming").expect("known").active);
    }

    #[tokio::test]
    async fn voucher_flow_stays_local_and_audited() {
        let server = MockServer::start().await;
        let console = console(&server).await;

        let applied = console
            .execute(Command::GenerateVouchers { count: 5 }, &all_mounted())
            .await
            .expect("generate");
        assert_eq!(applied.mutation, Mutation::VoucherCreate);
        assert_eq!(console.state().vouchers().vouchers().len(), 5);

        let id = console.state().vouchers().vouchers()[0].id;
        console
            .execute(
                Command::ClaimVoucher {
                    id,
                    by: "Guest's Phone".into(),
                },
                &all_mounted(),
            )
            .await
            .expect("claim");

        // Claims are one-way.
        let again = console
            .execute(
                Command::ClaimVoucher {
                    id,
                    by: "Someone else".into(),
                },
                &all_mounted(),
            )
            .await;
        assert!(matches!(again, Err(CoreError::VoucherAlreadyClaimed { .. })));
    }

    #[tokio::test]
    async fn section_refresh_failures_are_isolated() {
        let server = MockServer::start().await;
        let console = console(&server).await;

        // Clients endpoint works; stats endpoint is broken.
        Mock::given(method("GET"))
            .and(path("/api/admin/clients"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "clients": [{ "roll_no": "23203A0024" }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/admin/stats"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let plan = RefreshPlan {
            views: vec![View::Dashboard, View::Clients],
            refresh_notifications: false,
        };
        let failures = console.apply_plan(&plan).await;

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, View::Dashboard);
        // The working section still loaded.
        assert_eq!(console.state().clients.len(), 1);
    }
}
