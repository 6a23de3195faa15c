// ── Canonical domain types ──

pub mod bandwidth;
pub mod client;
pub mod filtering;
pub mod log;
pub mod report;
pub mod status;
pub mod voucher;

pub use bandwidth::{BandwidthLimit, BandwidthSelection, BandwidthTier, TierChoice};
pub use client::{BlockAction, BlockDecision, BlockState, Client};
pub use filtering::{BlockOrigin, BlockedSite, FilterTable, SiteCategory};
pub use log::{LogBuffer, LogEntry, LogLevel};
pub use report::{Report, ReportRange, ReportType};
pub use status::{Presentation, StatusClass, classify};
pub use voucher::{Voucher, VoucherLedger, VoucherStatus};
