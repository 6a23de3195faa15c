//! Bandwidth command handlers.

use std::sync::Arc;

use strum::IntoEnumIterator;
use tabled::Tabled;

use portway_core::model::bandwidth::{self, BandwidthTier, TierChoice};
use portway_core::{Client, Command as CoreCommand, MountedViews, View};

use crate::cli::{BandwidthArgs, BandwidthCommand, GlobalOpts};
use crate::config::Workspace;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BandwidthRow {
    #[tabled(rename = "Client")]
    name: String,
    #[tabled(rename = "Data (GB)")]
    data: String,
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Limit")]
    limit: String,
}

impl BandwidthRow {
    fn from(c: &Arc<Client>, color: bool) -> Self {
        let selection = bandwidth::resolve_display(c.bandwidth_limit);
        let limit = match selection.selected {
            TierChoice::Custom => format!(
                "Manual ({} Mbps)",
                selection.manual_mbps.unwrap_or_default()
            ),
            TierChoice::Tier(tier) => tier.label().to_owned(),
        };
        Self {
            name: c.display_name.clone(),
            data: format!("{:.1}", c.data_usage_gb),
            activity: c.activity.clone(),
            status: output::paint_status(&c.presentation(), color),
            limit,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    workspace: &Workspace,
    args: BandwidthArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &workspace.console;

    match args.command {
        BandwidthCommand::Show => {
            console.refresh_clients().await?;
            let snap = console.state().clients.snapshot();
            // Administrative accounts never appear on the bandwidth page.
            let visible: Vec<Arc<Client>> = snap
                .iter()
                .filter(|c| !c.is_admin())
                .map(Arc::clone)
                .collect();

            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &visible,
                |c| BandwidthRow::from(c, color),
                |c| c.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BandwidthCommand::Set { client, limit } => {
            // Validate the limit before anything goes on the wire.
            let resolved = parse_limit(&limit)?;
            let found = util::resolve_client(console, &client).await?;

            let mounted = MountedViews::new([View::Dashboard, View::Bandwidth]);
            let applied = console
                .execute(
                    CoreCommand::SetBandwidth {
                        id: found.id.clone(),
                        limit: resolved,
                    },
                    &mounted,
                )
                .await?;
            util::run_refresh(workspace, &applied.plan, global).await;

            if !global.quiet {
                eprintln!("Bandwidth limit for {} set to {resolved}", found.display_name);
            }
            Ok(())
        }
    }
}

/// Parse a limit argument: a tier token, or digits for a manual Mbps
/// override. Validation happens before any request is built.
fn parse_limit(input: &str) -> Result<portway_core::BandwidthLimit, CliError> {
    let trimmed = input.trim();
    let selection = if trimmed.chars().all(|c| c.is_ascii_digit()) && !trimmed.is_empty() {
        TierChoice::Custom
    } else {
        match BandwidthTier::from_token(&trimmed.to_ascii_lowercase()) {
            Some(tier) => TierChoice::Tier(tier),
            None => {
                let tokens: Vec<&str> = BandwidthTier::iter().map(BandwidthTier::token).collect();
                return Err(CliError::Validation {
                    field: "limit".into(),
                    reason: format!(
                        "expected one of {} or a positive Mbps number, got {trimmed:?}",
                        tokens.join(", ")
                    ),
                });
            }
        }
    };
    Ok(bandwidth::apply_edit(selection, Some(trimmed))?)
}
