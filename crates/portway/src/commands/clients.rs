//! Client command handlers.

use std::sync::Arc;

use tabled::Tabled;

use portway_core::{BlockAction, BlockDecision, BlockState, Client, Command as CoreCommand, MountedViews, View};

use crate::cli::{ClientsArgs, ClientsCommand, GlobalOpts};
use crate::config::Workspace;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "Client")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Data (GB)")]
    data: String,
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl ClientRow {
    fn from(c: &Arc<Client>, color: bool) -> Self {
        Self {
            name: c.display_name.clone(),
            ip: c.ip.clone().unwrap_or_else(|| "N/A".into()),
            data: format!("{:.1}", c.data_usage_gb),
            activity: c.activity.clone(),
            status: output::paint_status(&c.presentation(), color),
        }
    }
}

fn detail(c: &Arc<Client>) -> String {
    let presentation = c.presentation();
    let mut lines = vec![
        format!("ID:        {}", c.id),
        format!("Name:      {}", c.display_name),
        format!("IP:        {}", c.ip.as_deref().unwrap_or("-")),
        format!("Data:      {:.1} GB", c.data_usage_gb),
        format!("Activity:  {}", c.activity),
        format!("Status:    {} ({})", presentation.label, presentation.class.css_class()),
        format!("Blocked:   {}", c.blocked),
    ];
    if let Some(ref device) = c.device {
        lines.push(format!("Device:    {device}"));
    }
    if let Some(limit) = c.bandwidth_limit {
        lines.push(format!("Bandwidth: {limit}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    workspace: &Workspace,
    args: ClientsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &workspace.console;
    let color = output::should_color(&global.color);

    match args.command {
        ClientsCommand::List => {
            console.refresh_clients().await?;
            let snap = console.state().clients.snapshot();
            let out = output::render_list(
                &global.output,
                &snap,
                |c| ClientRow::from(c, color),
                |c| c.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ClientsCommand::Get { client } => {
            let found = util::resolve_client(console, &client).await?;
            let out = output::render_single(&global.output, &found, detail, |c| c.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ClientsCommand::Add {
            roll_no,
            password,
            activity,
        } => {
            let mounted = MountedViews::new([View::Dashboard, View::Clients]);
            let applied = console
                .execute(
                    CoreCommand::AddClient {
                        roll_no: roll_no.clone(),
                        password,
                        activity,
                    },
                    &mounted,
                )
                .await?;
            util::run_refresh(workspace, &applied.plan, global).await;
            if !global.quiet {
                eprintln!("Client {roll_no} registered");
            }
            util::print_summary_line(workspace, &applied.plan, global);
            Ok(())
        }

        ClientsCommand::Edit {
            client,
            roll_no,
            password,
        } => {
            let found = util::resolve_client(console, &client).await?;
            let mounted = MountedViews::new([View::Dashboard, View::Clients]);
            let applied = console
                .execute(
                    CoreCommand::EditClient {
                        id: found.id.clone(),
                        roll_no,
                        password,
                    },
                    &mounted,
                )
                .await?;
            util::run_refresh(workspace, &applied.plan, global).await;
            if !global.quiet {
                eprintln!("Client updated");
            }
            Ok(())
        }

        ClientsCommand::Block { client } => {
            toggle_block(workspace, &client, BlockAction::Block, global).await
        }

        ClientsCommand::Unblock { client } => {
            toggle_block(workspace, &client, BlockAction::Unblock, global).await
        }

        ClientsCommand::Import { file } => {
            let contents = std::fs::read(&file)?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "clients.csv".into());

            let mounted = MountedViews::new([View::Dashboard, View::Clients]);
            let (resp, applied) = console.import_clients(&file_name, contents, &mounted).await?;
            util::run_refresh(workspace, &applied.plan, global).await;

            if !global.quiet {
                eprintln!("Imported: {} added, {} skipped", resp.added, resp.skipped);
                for err in &resp.errors {
                    eprintln!("  row error: {err}");
                }
            }
            Ok(())
        }
    }
}

/// Block/unblock with the confirmation-gated transition.
async fn toggle_block(
    workspace: &Workspace,
    identifier: &str,
    action: BlockAction,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &workspace.console;
    let found = util::resolve_client(console, identifier).await?;

    // The CLI renders the client list, the bandwidth status column, and
    // the dashboard counters after this mutation.
    let mounted = MountedViews::new([View::Dashboard, View::Clients, View::Bandwidth]);

    let target_blocked = action == BlockAction::Block;
    let cmd = CoreCommand::SetBlocked {
        id: found.id.clone(),
        display_name: found.display_name.clone(),
        blocked: target_blocked,
    };

    let confirmed = match cmd.confirmation_prompt() {
        Some(prompt) => util::confirm(&prompt, global.yes)?,
        None => true,
    };

    match BlockState::from_flag(found.blocked).apply(action, confirmed) {
        BlockDecision::Unchanged => {
            if !global.quiet {
                if confirmed {
                    eprintln!("{} is already in that state", found.display_name);
                } else {
                    eprintln!("Cancelled -- no change made");
                }
            }
            Ok(())
        }
        BlockDecision::Transition { .. } => {
            let applied = console.execute(cmd, &mounted).await?;
            util::run_refresh(workspace, &applied.plan, global).await;

            if !global.quiet {
                let verb = if target_blocked { "blocked" } else { "unblocked" };
                eprintln!("Client {} {verb}", found.display_name);
            }
            util::print_summary_line(workspace, &applied.plan, global);
            util::print_notifications(workspace, &applied.plan, global);
            Ok(())
        }
    }
}
