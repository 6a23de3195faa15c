//! Report generation and export.

use portway_core::{MountedViews, Report, View};

use crate::cli::{GlobalOpts, ReportsArgs, ReportsCommand};
use crate::config::Workspace;
use crate::error::CliError;
use crate::output;

use super::util;

fn render_table(report: &Report) -> String {
    let mut builder = tabled::builder::Builder::default();
    builder.push_record(report.headers.clone());
    for row in &report.rows {
        builder.push_record(row.clone());
    }
    let table = builder
        .build()
        .with(tabled::settings::Style::rounded())
        .to_string();
    format!("{}\n{table}", report.title)
}

pub async fn handle(
    workspace: &Workspace,
    args: ReportsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &workspace.console;

    match args.command {
        ReportsCommand::Generate {
            report_type,
            range,
            offline,
            csv,
        } => {
            if offline {
                // Offline aggregation works over the local snapshot, so
                // make sure one is loaded first.
                console.refresh_clients().await?;
                console.refresh_filtering().await?;
                console.refresh_logs().await?;
            }

            let mounted = MountedViews::new([View::Dashboard, View::Reporting]);
            let (report, applied) = console
                .generate_report(report_type, range, offline, &mounted)
                .await?;
            util::run_refresh(workspace, &applied.plan, global).await;

            if let Some(path) = csv {
                std::fs::write(&path, report.to_csv())?;
                if !global.quiet {
                    eprintln!("Wrote {} to {}", report.title, path.display());
                }
                return Ok(());
            }

            let out = match global.output {
                crate::cli::OutputFormat::Table => render_table(&report),
                crate::cli::OutputFormat::Json => output::render_json(&report),
                crate::cli::OutputFormat::Yaml => output::render_yaml(&report),
                crate::cli::OutputFormat::Plain => report.to_csv(),
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
