//! Command handlers.

pub mod bandwidth;
pub mod clients;
pub mod config_cmd;
pub mod filtering;
pub mod logs;
pub mod reports;
pub mod session;
pub mod stats;
pub mod util;
pub mod vouchers;

use crate::cli::{Command, GlobalOpts};
use crate::config::Workspace;
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(
    cmd: Command,
    workspace: &Workspace,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => session::login(workspace, args, global).await,
        Command::Logout => session::logout(workspace, global).await,
        Command::Clients(args) => clients::handle(workspace, args, global).await,
        Command::Bandwidth(args) => bandwidth::handle(workspace, args, global).await,
        Command::Filtering(args) => filtering::handle(workspace, args, global).await,
        Command::Vouchers(args) => vouchers::handle(workspace, args, global).await,
        Command::Guest(args) => vouchers::handle_guest(workspace, args, global).await,
        Command::Logs(args) => logs::handle(workspace, args, global).await,
        Command::Stats(args) => stats::handle(workspace, args, global).await,
        Command::Reports(args) => reports::handle(workspace, args, global).await,
        // Handled before a workspace is built.
        Command::Config(_) | Command::Completions(_) => unreachable!("handled in run()"),
    }
}
