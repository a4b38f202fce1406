//! In-memory report store.

use crate::{NewReport, Report, ReportId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Pending reports keyed by identifier.
///
/// The store is the single source of truth for which reports are still
/// actionable. Every operation takes the lock once and never holds it across
/// an await, so operations on the same id are atomic with respect to each other.
///
/// Reports are process-lifetime only: a restart loses every pending report.
///
/// # Example
///
/// ```
/// use tribunal_core::{ChannelId, GuildId, NewReportBuilder, ReportStore, UserRef};
///
/// let store = ReportStore::new();
/// let new = NewReportBuilder::default()
///     .guild_id(GuildId(1))
///     .channel_id(ChannelId(2))
///     .author(UserRef::new(3, "author"))
///     .content("hello")
///     .build()
///     .expect("valid report");
///
/// let id = store.create(new);
/// assert!(store.get(&id).is_some());
/// store.delete(&id);
/// assert!(store.get(&id).is_none());
/// ```
#[derive(Debug, Default)]
pub struct ReportStore {
    reports: Mutex<HashMap<ReportId, Arc<Report>>>,
}

impl ReportStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a report under a freshly generated identifier.
    pub fn create(&self, new: NewReport) -> ReportId {
        self.create_with(new, ReportId::generate)
    }

    /// Insert a report, drawing candidate identifiers from `next_id`.
    ///
    /// Candidates that collide with a pending report are discarded and a new
    /// one is drawn, all under the same lock acquisition.
    #[instrument(skip_all)]
    pub fn create_with(&self, new: NewReport, mut next_id: impl FnMut() -> ReportId) -> ReportId {
        let mut reports = self.reports.lock();
        let id = loop {
            let candidate = next_id();
            if !reports.contains_key(&candidate) {
                break candidate;
            }
            debug!(report_id = %candidate, "Report id collision, regenerating");
        };

        reports.insert(id.clone(), Arc::new(Report::from_new(id.clone(), new)));
        debug!(report_id = %id, pending = reports.len(), "Stored report");
        id
    }

    /// Look up a pending report.
    pub fn get(&self, id: &ReportId) -> Option<Arc<Report>> {
        self.reports.lock().get(id).cloned()
    }

    /// Whether a report is still pending.
    pub fn contains(&self, id: &ReportId) -> bool {
        self.reports.lock().contains_key(id)
    }

    /// Remove a report. Returns whether it was present.
    pub fn delete(&self, id: &ReportId) -> bool {
        self.take(id).is_some()
    }

    /// Remove and return a report.
    ///
    /// Used to claim a report for resolution: of several concurrent callers
    /// for the same id, exactly one receives `Some`.
    pub fn take(&self, id: &ReportId) -> Option<Arc<Report>> {
        self.reports.lock().remove(id)
    }

    /// Put a previously taken report back, e.g. when applying its outcome failed.
    pub fn reinstate(&self, report: Arc<Report>) {
        let id = report.id().clone();
        self.reports.lock().insert(id, report);
    }

    /// Number of pending reports.
    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    /// Whether no reports are pending.
    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }
}
