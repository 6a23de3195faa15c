//! Activity log command handler.

use tabled::Tabled;

use portway_core::{LogEntry, LogLevel};

use crate::cli::{GlobalOpts, LogsArgs};
use crate::config::Workspace;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "User / IP")]
    user: String,
    #[tabled(rename = "Action")]
    action: String,
}

impl LogRow {
    fn from(e: &LogEntry, color: bool) -> Self {
        Self {
            time: e.time.clone(),
            level: output::paint_level(e.level, color),
            user: format!("{} / {}", e.user, e.ip.as_deref().unwrap_or("N/A")),
            action: e.action.clone(),
        }
    }
}

pub async fn handle(
    workspace: &Workspace,
    args: LogsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &workspace.console;
    console.refresh_logs().await?;

    let entries: Vec<LogEntry> = if args.notifications {
        console.state().notifications()
    } else {
        let wanted: Option<LogLevel> = args.level.as_deref().and_then(|l| l.parse().ok());
        console
            .state()
            .logs()
            .into_iter()
            .filter(|e| wanted.is_none_or(|w| e.level == w))
            .collect()
    };

    if entries.is_empty() && !global.quiet {
        eprintln!("No matching log entries");
        return Ok(());
    }

    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        &entries,
        |e| LogRow::from(e, color),
        |e| format!("{} {}", e.time, e.action),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
