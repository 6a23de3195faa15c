//! Web-content filtering command handlers.

use tabled::Tabled;

use portway_core::{BlockOrigin, BlockedSite, Command as CoreCommand, MountedViews, View};

use crate::cli::{FilteringArgs, FilteringCommand, GlobalOpts};
use crate::config::Workspace;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Source")]
    source: String,
}

impl From<&BlockedSite> for SiteRow {
    fn from(site: &BlockedSite) -> Self {
        Self {
            domain: site.domain.clone(),
            source: match &site.origin {
                BlockOrigin::Manual => "manual".into(),
                BlockOrigin::Category(name) => format!("category: {name}"),
            },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    workspace: &Workspace,
    args: FilteringArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &workspace.console;
    let mounted = MountedViews::new([View::Dashboard, View::WebFiltering]);

    match args.command {
        FilteringCommand::List => {
            console.refresh_filtering().await?;
            let table = console.state().filter();

            let blocklist = table.effective_blocklist();
            let out = output::render_list(
                &global.output,
                &blocklist,
                |s| SiteRow::from(s),
                |s| s.domain.clone(),
            );
            output::print_output(&out, global.quiet);

            if !global.quiet {
                for category in table.categories() {
                    let state = if category.active { "on " } else { "off" };
                    eprintln!("[{state}] {} ({} sites)", category.name, category.sites.len());
                }
            }
            Ok(())
        }

        FilteringCommand::Block { domain } => {
            let applied = console
                .execute(CoreCommand::BlockSite { domain: domain.clone() }, &mounted)
                .await?;
            util::run_refresh(workspace, &applied.plan, global).await;
            if !global.quiet {
                eprintln!("{domain} added to the manual block list");
            }
            util::print_notifications(workspace, &applied.plan, global);
            Ok(())
        }

        FilteringCommand::Unblock { domain } => {
            // The coverage guard needs the current table.
            console.refresh_filtering().await?;
            let applied = console
                .execute(CoreCommand::UnblockSite { domain: domain.clone() }, &mounted)
                .await?;
            util::run_refresh(workspace, &applied.plan, global).await;
            if !global.quiet {
                eprintln!("{domain} removed from the manual block list");
            }
            Ok(())
        }

        FilteringCommand::Toggle { category } => {
            console.refresh_filtering().await?;
            let applied = console
                .execute(
                    CoreCommand::ToggleCategory { name: category.clone() },
                    &mounted,
                )
                .await?;
            util::run_refresh(workspace, &applied.plan, global).await;

            if !global.quiet {
                let active = console
                    .state()
                    .filter()
                    .category(&category)
                    .is_some_and(|c| c.active);
                let state = if active { "enabled" } else { "disabled" };
                eprintln!("Category block {state}: {category}");
            }
            util::print_notifications(workspace, &applied.plan, global);
            Ok(())
        }
    }
}
