//! Guest voucher and guest-network command handlers.

use tabled::Tabled;

use portway_core::{Command as CoreCommand, MountedViews, View, Voucher, VoucherStatus};

use crate::cli::{GlobalOpts, GuestArgs, GuestCommand, VouchersArgs, VouchersCommand};
use crate::config::Workspace;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct VoucherRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Voucher> for VoucherRow {
    fn from(v: &Voucher) -> Self {
        Self {
            id: v.id,
            code: v.code.clone(),
            duration: v.duration.clone(),
            status: match &v.status {
                VoucherStatus::Unused => "Unused".into(),
                VoucherStatus::Claimed { by } => format!("Claimed by {by}"),
            },
        }
    }
}

fn mounted() -> MountedViews {
    MountedViews::new([View::Dashboard, View::GuestNetwork])
}

// ── Voucher handler ─────────────────────────────────────────────────

pub async fn handle(
    workspace: &Workspace,
    args: VouchersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &workspace.console;

    match args.command {
        VouchersCommand::List => {
            let ledger = console.state().vouchers();
            let out = output::render_list(
                &global.output,
                ledger.vouchers(),
                |v| VoucherRow::from(v),
                |v| v.code.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VouchersCommand::Create { code, duration } => {
            let applied = console
                .execute(
                    CoreCommand::CreateVoucher {
                        code: code.clone(),
                        duration,
                    },
                    &mounted(),
                )
                .await?;
            workspace.save_ledger()?;
            util::run_refresh(workspace, &applied.plan, global).await;
            if !global.quiet {
                eprintln!("Voucher {code} created");
            }
            Ok(())
        }

        VouchersCommand::Generate { count } => {
            let applied = console
                .execute(CoreCommand::GenerateVouchers { count }, &mounted())
                .await?;
            workspace.save_ledger()?;
            util::run_refresh(workspace, &applied.plan, global).await;
            if !global.quiet {
                eprintln!("Generated {count} vouchers:");
                for voucher in console.state().vouchers().vouchers().iter().take(count) {
                    eprintln!("  {}", voucher.code);
                }
            }
            Ok(())
        }

        VouchersCommand::Claim { id, by } => {
            let applied = console
                .execute(CoreCommand::ClaimVoucher { id, by }, &mounted())
                .await?;
            workspace.save_ledger()?;
            util::run_refresh(workspace, &applied.plan, global).await;
            if !global.quiet {
                eprintln!("Voucher #{id} claimed");
            }
            Ok(())
        }

        VouchersCommand::Delete { id } => {
            let cmd = CoreCommand::DeleteVoucher { id };
            if let Some(prompt) = cmd.confirmation_prompt() {
                if !util::confirm(&prompt, global.yes)? {
                    if !global.quiet {
                        eprintln!("Cancelled -- voucher kept");
                    }
                    return Ok(());
                }
            }

            let applied = console.execute(cmd, &mounted()).await?;
            workspace.save_ledger()?;
            util::run_refresh(workspace, &applied.plan, global).await;
            if !global.quiet {
                eprintln!("Voucher #{id} deleted");
            }
            Ok(())
        }
    }
}

// ── Guest network handler ───────────────────────────────────────────

pub async fn handle_guest(
    workspace: &Workspace,
    args: GuestArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &workspace.console;

    match args.command {
        GuestCommand::Status => {
            let enabled = console.state().vouchers().guest_enabled;
            output::print_output(
                if enabled { "Enabled" } else { "Disabled" },
                global.quiet,
            );
            Ok(())
        }

        command @ (GuestCommand::On | GuestCommand::Off) => {
            let enabled = matches!(command, GuestCommand::On);
            let applied = console
                .execute(CoreCommand::SetGuestNetwork { enabled }, &mounted())
                .await?;
            workspace.save_ledger()?;
            util::run_refresh(workspace, &applied.plan, global).await;
            if !global.quiet {
                eprintln!(
                    "Guest network {}",
                    if enabled { "enabled" } else { "disabled" }
                );
            }
            util::print_notifications(workspace, &applied.plan, global);
            Ok(())
        }
    }
}
