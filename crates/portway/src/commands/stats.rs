//! Dashboard summary handler, including the live watch loop.

use tokio_util::sync::CancellationToken;

use portway_core::Summary;

use crate::cli::{GlobalOpts, StatsArgs};
use crate::config::Workspace;
use crate::error::CliError;
use crate::output;

fn render(summary: Summary, global: &GlobalOpts) -> String {
    match global.output {
        crate::cli::OutputFormat::Table | crate::cli::OutputFormat::Plain => format!(
            "Active clients:  {}\nTotal data:      {:.1} GB\nThreats blocked: {}",
            summary.active_clients, summary.total_data_gb, summary.threats_blocked
        ),
        crate::cli::OutputFormat::Json => output::render_json(&summary),
        crate::cli::OutputFormat::Yaml => output::render_yaml(&summary),
    }
}

pub async fn handle(
    workspace: &Workspace,
    args: StatsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &workspace.console;

    if !args.watch {
        let summary = console.refresh_summary().await?;
        output::print_output(&render(summary, global), global.quiet);
        return Ok(());
    }

    // Live mode: poll on an interval until Ctrl-C. The cancellation
    // token tears the timer down with the view, so nothing keeps
    // polling a dashboard nobody is looking at.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            cancel.cancel();
        });
    }

    let mut ticker = tokio::time::interval(args.interval);
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                match console.refresh_summary().await {
                    Ok(summary) => output::print_output(&render(summary, global), global.quiet),
                    // A failed poll surfaces but doesn't end the loop;
                    // the next tick retries the fetch.
                    Err(e) => {
                        if !global.quiet {
                            eprintln!("warning: stats fetch failed: {e}");
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
