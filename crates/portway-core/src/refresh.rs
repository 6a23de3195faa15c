// ── View refresh coordination ──
//
// Several sections render the same underlying entities, so one mutation
// can stale more than the section it happened on. After any mutation
// the coordinator names the mounted sections that must re-fetch: the
// mutation's own footprint, plus the dashboard counters and the log
// feed (every mutation appends an audit entry). Sections that are not
// mounted are left alone — there is no background pre-fetch.

use std::collections::HashSet;

use crate::model::log::LogLevel;

/// The page sections of the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    Clients,
    WebFiltering,
    Bandwidth,
    Logs,
    GuestNetwork,
    Reporting,
}

/// Every state-changing action the console knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    ClientAdd,
    ClientEdit,
    BlockToggle,
    BandwidthChange,
    SiteAdd,
    SiteRemove,
    CategoryToggle,
    VoucherCreate,
    VoucherDelete,
    VoucherClaim,
    GuestToggle,
    ReportGenerate,
    BulkImport,
}

impl Mutation {
    /// The sections whose data this mutation can stale, beyond the
    /// always-refreshed dashboard and log feed.
    fn affected(self) -> &'static [View] {
        match self {
            Self::ClientAdd | Self::ClientEdit | Self::BulkImport => &[View::Clients],
            // Blocked state shows on both the client list and the
            // bandwidth page's status column.
            Self::BlockToggle => &[View::Clients, View::Bandwidth],
            Self::BandwidthChange => &[View::Bandwidth],
            Self::SiteAdd | Self::SiteRemove | Self::CategoryToggle => &[View::WebFiltering],
            Self::VoucherCreate | Self::VoucherDelete | Self::VoucherClaim | Self::GuestToggle => {
                &[View::GuestNetwork]
            }
            Self::ReportGenerate => &[View::Reporting],
        }
    }
}

/// The set of sections currently mounted (present in the interface).
#[derive(Debug, Clone, Default)]
pub struct MountedViews(HashSet<View>);

impl MountedViews {
    pub fn new(views: impl IntoIterator<Item = View>) -> Self {
        Self(views.into_iter().collect())
    }

    pub fn contains(&self, view: View) -> bool {
        self.0.contains(&view)
    }
}

/// What must happen after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshPlan {
    /// Mounted sections to re-initialize, in a stable order.
    pub views: Vec<View>,
    /// True when the mutation's audit entry was warn or error level —
    /// the notification feed gained an entry.
    pub refresh_notifications: bool,
}

impl RefreshPlan {
    /// Build the plan for one mutation.
    pub fn for_mutation(mutation: Mutation, level: LogLevel, mounted: &MountedViews) -> Self {
        const ORDER: [View; 7] = [
            View::Dashboard,
            View::Clients,
            View::Bandwidth,
            View::WebFiltering,
            View::GuestNetwork,
            View::Logs,
            View::Reporting,
        ];

        let mut wanted: HashSet<View> = mutation.affected().iter().copied().collect();
        // Summary counters and the log feed change on every mutation.
        wanted.insert(View::Dashboard);
        wanted.insert(View::Logs);

        let views = ORDER
            .into_iter()
            .filter(|v| wanted.contains(v) && mounted.contains(*v))
            .collect();

        Self {
            views,
            refresh_notifications: level.is_notable(),
        }
    }
}
