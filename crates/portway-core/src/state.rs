// ── Shared application state ──
//
// One explicitly owned object holding the client directory, filter
// table, voucher ledger, log ring, and summary counters. Components
// receive it by reference instead of reaching for module-level
// singletons, so each piece is testable in isolation.

use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::watch;

use crate::model::client::Client;
use crate::model::filtering::FilterTable;
use crate::model::log::{LogBuffer, LogEntry, LogLevel};
use crate::model::voucher::VoucherLedger;

/// Dashboard summary counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Clients that are not blocked.
    pub active_clients: u64,
    pub total_data_gb: f64,
    pub threats_blocked: u64,
}

/// Concurrent client directory with push-based snapshot notification.
///
/// `DashMap` gives O(1) keyed access for mutations; the `watch` channel
/// republishes a sorted snapshot after every change so the live stats
/// view re-renders without polling the map.
pub struct ClientDirectory {
    by_id: DashMap<String, Arc<Client>>,
    snapshot: watch::Sender<Arc<Vec<Arc<Client>>>>,
}

impl Default for ClientDirectory {
    fn default() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            by_id: DashMap::new(),
            snapshot,
        }
    }
}

impl ClientDirectory {
    /// Insert or update one client.
    pub fn upsert(&self, client: Client) {
        self.by_id.insert(client.id.clone(), Arc::new(client));
        self.rebuild_snapshot();
    }

    /// Replace the directory from a fresh listing: upsert everything
    /// incoming, then prune ids the listing no longer contains. Avoids
    /// the brief empty state a clear-then-insert would cause.
    pub fn replace_all(&self, clients: Vec<Client>) {
        let incoming: std::collections::HashSet<String> =
            clients.iter().map(|c| c.id.clone()).collect();
        for client in clients {
            self.by_id.insert(client.id.clone(), Arc::new(client));
        }
        self.by_id.retain(|id, _| incoming.contains(id));
        self.rebuild_snapshot();
    }

    pub fn get(&self, id: &str) -> Option<Arc<Client>> {
        self.by_id.get(id).map(|r| Arc::clone(r.value()))
    }

    /// Find by id or display name (CLI arguments accept either).
    pub fn resolve(&self, identifier: &str) -> Option<Arc<Client>> {
        self.get(identifier).or_else(|| {
            self.by_id
                .iter()
                .find(|r| r.value().display_name == identifier)
                .map(|r| Arc::clone(r.value()))
        })
    }

    /// Current snapshot, sorted by display name (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Arc<Client>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<Client>>>> {
        self.snapshot.subscribe()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    fn rebuild_snapshot(&self) {
        let mut values: Vec<Arc<Client>> =
            self.by_id.iter().map(|r| Arc::clone(r.value())).collect();
        values.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }
}

/// The injectable application state.
pub struct AppState {
    pub clients: ClientDirectory,
    filter: RwLock<FilterTable>,
    vouchers: RwLock<VoucherLedger>,
    logs: RwLock<LogBuffer>,
    summary: watch::Sender<Summary>,
}

impl Default for AppState {
    fn default() -> Self {
        let (summary, _) = watch::channel(Summary::default());
        Self {
            clients: ClientDirectory::default(),
            filter: RwLock::new(FilterTable::default()),
            vouchers: RwLock::new(VoucherLedger::default()),
            logs: RwLock::new(LogBuffer::default()),
            summary,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Filter table ─────────────────────────────────────────────────

    pub fn filter(&self) -> FilterTable {
        self.filter.read().expect("filter lock poisoned").clone()
    }

    pub fn set_filter(&self, table: FilterTable) {
        *self.filter.write().expect("filter lock poisoned") = table;
    }

    pub fn with_filter_mut<R>(&self, f: impl FnOnce(&mut FilterTable) -> R) -> R {
        f(&mut self.filter.write().expect("filter lock poisoned"))
    }

    // ── Voucher ledger ───────────────────────────────────────────────

    pub fn vouchers(&self) -> VoucherLedger {
        self.vouchers.read().expect("voucher lock poisoned").clone()
    }

    pub fn set_vouchers(&self, ledger: VoucherLedger) {
        *self.vouchers.write().expect("voucher lock poisoned") = ledger;
    }

    pub fn with_vouchers_mut<R>(&self, f: impl FnOnce(&mut VoucherLedger) -> R) -> R {
        f(&mut self.vouchers.write().expect("voucher lock poisoned"))
    }

    // ── Log ring ─────────────────────────────────────────────────────

    /// Append an audit entry, resolving the actor's IP from the client
    /// directory when the actor is a managed client.
    pub fn record(&self, level: LogLevel, user: &str, action: impl Into<String>) -> LogEntry {
        let mut entry = LogEntry::now(level, user, action);
        entry.ip = self
            .clients
            .resolve(user)
            .and_then(|c| c.ip.as_ref().cloned());
        self.logs.write().expect("log lock poisoned").push(entry.clone());
        entry
    }

    pub fn logs(&self) -> Vec<LogEntry> {
        self.logs.read().expect("log lock poisoned").entries()
    }

    pub fn replace_logs(&self, entries: impl IntoIterator<Item = LogEntry>) {
        self.logs
            .write()
            .expect("log lock poisoned")
            .replace_all(entries);
    }

    /// The newest five warn/error entries.
    pub fn notifications(&self) -> Vec<LogEntry> {
        self.logs.read().expect("log lock poisoned").notifications(5)
    }

    // ── Summary counters ─────────────────────────────────────────────

    pub fn summary(&self) -> Summary {
        *self.summary.borrow()
    }

    pub fn subscribe_summary(&self) -> watch::Receiver<Summary> {
        self.summary.subscribe()
    }

    /// Overwrite from a stats fetch, then reconcile the active count
    /// with the local directory.
    pub fn set_summary(&self, summary: Summary) {
        self.summary.send_modify(|s| *s = summary);
    }

    /// Recompute the active-client count from the directory, keeping
    /// the fetched totals.
    pub fn recount_active(&self) {
        let active = self
            .clients
            .snapshot()
            .iter()
            .filter(|c| !c.blocked)
            .count() as u64;
        self.summary.send_modify(|s| s.active_clients = active);
    }
}
