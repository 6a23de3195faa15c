// ── Typed mutation commands ──
//
// Every state-changing action the console can perform, as one enum.
// The UI layer maps "what the user did" to a command and hands it to
// [`Console::execute`](crate::Console::execute); the dispatch table
// replaces the event-delegation wiring a browser front end would use.

use crate::model::bandwidth::BandwidthLimit;
use crate::model::log::LogEntry;
use crate::refresh::{Mutation, RefreshPlan};

/// A state-changing action, ready to execute.
///
/// Commands that destroy or restrict something carry a confirmation
/// prompt; the UI must get an explicit yes before calling `execute`.
/// A declined prompt means the command is simply never constructed —
/// no request, no log entry, no state change.
#[derive(Debug, Clone)]
pub enum Command {
    AddClient {
        roll_no: String,
        password: Option<String>,
        activity: Option<String>,
    },
    EditClient {
        id: String,
        roll_no: String,
        password: Option<String>,
    },
    SetBlocked {
        id: String,
        display_name: String,
        blocked: bool,
    },
    SetBandwidth {
        id: String,
        limit: BandwidthLimit,
    },
    BlockSite {
        domain: String,
    },
    UnblockSite {
        domain: String,
    },
    ToggleCategory {
        name: String,
    },
    CreateVoucher {
        code: String,
        duration: String,
    },
    GenerateVouchers {
        count: usize,
    },
    ClaimVoucher {
        id: u32,
        by: String,
    },
    DeleteVoucher {
        id: u32,
    },
    SetGuestNetwork {
        enabled: bool,
    },
}

impl Command {
    /// Which mutation kind this command is, for refresh planning.
    pub fn mutation(&self) -> Mutation {
        match self {
            Self::AddClient { .. } => Mutation::ClientAdd,
            Self::EditClient { .. } => Mutation::ClientEdit,
            Self::SetBlocked { .. } => Mutation::BlockToggle,
            Self::SetBandwidth { .. } => Mutation::BandwidthChange,
            Self::BlockSite { .. } => Mutation::SiteAdd,
            Self::UnblockSite { .. } => Mutation::SiteRemove,
            Self::ToggleCategory { .. } => Mutation::CategoryToggle,
            Self::CreateVoucher { .. } | Self::GenerateVouchers { .. } => Mutation::VoucherCreate,
            Self::ClaimVoucher { .. } => Mutation::VoucherClaim,
            Self::DeleteVoucher { .. } => Mutation::VoucherDelete,
            Self::SetGuestNetwork { .. } => Mutation::GuestToggle,
        }
    }

    /// Prompt text for commands that need explicit confirmation.
    pub fn confirmation_prompt(&self) -> Option<String> {
        match self {
            Self::SetBlocked {
                display_name,
                blocked,
                ..
            } => Some(if *blocked {
                format!("Are you sure you want to block {display_name}?")
            } else {
                format!("Are you sure you want to unblock {display_name}?")
            }),
            Self::DeleteVoucher { id } => {
                Some(format!("Are you sure you want to delete voucher #{id}?"))
            }
            _ => None,
        }
    }
}

/// Result of a successfully executed command.
#[derive(Debug, Clone)]
pub struct Applied {
    pub mutation: Mutation,
    /// The audit entry the mutation produced.
    pub log: LogEntry,
    /// Which mounted sections must re-fetch.
    pub plan: RefreshPlan,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::Mutation;

    #[test]
    fn block_and_voucher_delete_require_confirmation() {
        let block = Command::SetBlocked {
            id: "c1".into(),
            display_name: "23203A0024".into(),
            blocked: true,
        };
        assert!(block.confirmation_prompt().expect("prompt").contains("block 23203A0024"));

        let delete = Command::DeleteVoucher { id: 3 };
        assert!(delete.confirmation_prompt().is_some());

        let bandwidth = Command::SetBandwidth {
            id: "c1".into(),
            limit: crate::model::bandwidth::BandwidthLimit::ManualMbps(50),
        };
        assert!(bandwidth.confirmation_prompt().is_none());
    }

    #[test]
    fn commands_map_to_their_mutations() {
        assert_eq!(
            Command::BlockSite { domain: "x.com".into() }.mutation(),
            Mutation::SiteAdd
        );
        assert_eq!(
            Command::GenerateVouchers { count: 5 }.mutation(),
            Mutation::VoucherCreate
        );
    }
}
