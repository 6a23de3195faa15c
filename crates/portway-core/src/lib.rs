//! Domain model and view-model logic for the portway admin console.
//!
//! This crate owns everything between the raw REST surface
//! (`portway-api`) and the UI layer (the `portway` CLI):
//!
//! - **[`normalize`]** — canonicalizes the backend's heterogeneous client
//!   payloads through an explicit, ordered field-alias table.
//! - **Domain model** ([`model`]) — canonical types (`Client`,
//!   `BandwidthLimit`, `FilterTable`, `Voucher`, `LogEntry`, `Report`)
//!   together with the two pieces of presentation logic that have real
//!   rules: bandwidth display resolution and the layered status
//!   classifier.
//! - **[`AppState`]** — the shared client/filter/voucher/log collections
//!   as one explicitly owned, injectable object instead of a module-wide
//!   singleton, so every component is testable in isolation.
//! - **[`refresh`]** — the view refresh coordinator: after a mutation it
//!   decides which mounted sections must re-fetch, and whether the
//!   notification feed changed.
//! - **[`Console`]** — facade tying the API client and the state
//!   together; executes typed [`Command`]s and hands back the refresh
//!   plan for the mutation.

pub mod command;
pub mod console;
pub mod error;
pub mod model;
pub mod normalize;
pub mod refresh;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Applied, Command};
pub use console::Console;
pub use error::CoreError;
pub use portway_api::Error as ApiError;
pub use refresh::{MountedViews, Mutation, RefreshPlan, View};
pub use state::{AppState, Summary};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    BandwidthLimit,
    BandwidthSelection,
    BandwidthTier,
    BlockAction,
    BlockDecision,
    BlockState,
    BlockedSite,
    BlockOrigin,
    Client,
    FilterTable,
    LogBuffer,
    LogEntry,
    LogLevel,
    Presentation,
    Report,
    ReportRange,
    ReportType,
    SiteCategory,
    StatusClass,
    TierChoice,
    Voucher,
    VoucherLedger,
    VoucherStatus,
};
