//! Shared helpers for command handlers.

use std::sync::Arc;

use portway_core::{Client, Console, RefreshPlan, View};

use crate::cli::GlobalOpts;
use crate::config::Workspace;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Declining is not an error: the caller sees `false` and simply never
/// builds the command.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Resolve a client identifier (backend id or display name) against a
/// fresh listing.
pub async fn resolve_client(console: &Console, identifier: &str) -> Result<Arc<Client>, CliError> {
    if console.state().clients.is_empty() {
        console.refresh_clients().await?;
    }
    console
        .state()
        .clients
        .resolve(identifier)
        .ok_or_else(|| CliError::NotFound {
            resource_type: "client".into(),
            identifier: identifier.to_owned(),
            list_command: "clients list".into(),
        })
}

/// Apply a refresh plan and surface per-section failures without
/// aborting: each broken section prints its own placeholder line.
pub async fn run_refresh(workspace: &Workspace, plan: &RefreshPlan, global: &GlobalOpts) {
    let failures = workspace.console.apply_plan(plan).await;
    for (view, err) in failures {
        if !global.quiet {
            eprintln!("warning: could not refresh {view:?}: {err}");
        }
    }
}

/// Print the refreshed dashboard summary when it was part of the plan.
pub fn print_summary_line(workspace: &Workspace, plan: &RefreshPlan, global: &GlobalOpts) {
    if global.quiet || !plan.views.contains(&View::Dashboard) {
        return;
    }
    let summary = workspace.console.state().summary();
    eprintln!(
        "dashboard: {} active clients, {:.1} GB total, {} threats blocked",
        summary.active_clients, summary.total_data_gb, summary.threats_blocked
    );
}

/// Print the notification feed when the mutation made it change.
pub fn print_notifications(workspace: &Workspace, plan: &RefreshPlan, global: &GlobalOpts) {
    if global.quiet || !plan.refresh_notifications {
        return;
    }
    for entry in workspace.console.state().notifications() {
        eprintln!(
            "notification [{}] {}: {}",
            entry.level.to_string().to_uppercase(),
            entry.user,
            entry.action
        );
    }
}
