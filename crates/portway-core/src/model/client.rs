// ── Client domain types ──

use serde::{Deserialize, Serialize};

use super::bandwidth::BandwidthLimit;
use super::status::{Presentation, classify};

/// The canonical client record, after normalization.
///
/// `blocked` is the authoritative flag; `status`, when present, takes
/// display precedence but never feeds back into the flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Backend identity used for mutations. Falls back to the display
    /// name when the payload carried no id field.
    pub id: String,
    pub display_name: String,
    pub device: Option<String>,
    /// Not validated — displayed as sent.
    pub ip: Option<String>,
    /// Cumulative usage in gigabytes; never negative.
    pub data_usage_gb: f64,
    pub activity: String,
    pub blocked: bool,
    /// Optional free-text display override; see the status classifier.
    pub status: Option<String>,
    pub bandwidth_limit: Option<BandwidthLimit>,
    pub role: Option<String>,
}

impl Client {
    /// Administrative accounts are hidden from the bandwidth view.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    /// Display status for this record.
    pub fn presentation(&self) -> Presentation {
        classify(self.status.as_deref(), self.blocked)
    }
}

// ── Blocked-status state machine ────────────────────────────────────

/// The two blocked states a client can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Active,
    Blocked,
}

impl BlockState {
    pub fn from_flag(blocked: bool) -> Self {
        if blocked { Self::Blocked } else { Self::Active }
    }

    pub fn as_flag(self) -> bool {
        matches!(self, Self::Blocked)
    }

    /// Apply a user action to this state.
    ///
    /// Both transitions are gated on an explicit confirmation; declining
    /// leaves the state unchanged and must issue no request. Asking for
    /// the transition the client is already in is a no-op as well.
    pub fn apply(self, action: BlockAction, confirmed: bool) -> BlockDecision {
        if !confirmed {
            return BlockDecision::Unchanged;
        }
        match (self, action) {
            (Self::Active, BlockAction::Block) => BlockDecision::Transition { blocked: true },
            (Self::Blocked, BlockAction::Unblock) => BlockDecision::Transition { blocked: false },
            _ => BlockDecision::Unchanged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAction {
    Block,
    Unblock,
}

/// Outcome of the confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockDecision {
    /// Send `PATCH {blocked}` and record the audit entry.
    Transition { blocked: bool },
    /// No request, no log entry, no state change.
    Unchanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmed_block_transitions_active_to_blocked() {
        let decision = BlockState::Active.apply(BlockAction::Block, true);
        assert_eq!(decision, BlockDecision::Transition { blocked: true });
    }

    #[test]
    fn confirmed_unblock_transitions_blocked_to_active() {
        let decision = BlockState::Blocked.apply(BlockAction::Unblock, true);
        assert_eq!(decision, BlockDecision::Transition { blocked: false });
    }

    #[test]
    fn declined_confirmation_is_a_no_op() {
        assert_eq!(
            BlockState::Active.apply(BlockAction::Block, false),
            BlockDecision::Unchanged
        );
        assert_eq!(
            BlockState::Blocked.apply(BlockAction::Unblock, false),
            BlockDecision::Unchanged
        );
    }

    #[test]
    fn redundant_transitions_are_no_ops() {
        assert_eq!(
            BlockState::Blocked.apply(BlockAction::Block, true),
            BlockDecision::Unchanged
        );
        assert_eq!(
            BlockState::Active.apply(BlockAction::Unblock, true),
            BlockDecision::Unchanged
        );
    }
}
