//! Schedule memoization.
//!
//! Schedules depend only on security-level terms, so positions holding the
//! same security on the same closing date share one schedule. The cache is
//! passed explicitly to each request; one cache must serve a single
//! schedule configuration.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use ladder_core::types::{CashflowSchedule, Date};

/// Cache key: closing date and security identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleKey {
    /// Valuation date.
    pub closing_date: Date,
    /// Security identifier.
    pub security_id: String,
}

impl ScheduleKey {
    /// Creates a key.
    #[must_use]
    pub fn new(closing_date: Date, security_id: impl Into<String>) -> Self {
        Self {
            closing_date,
            security_id: security_id.into(),
        }
    }
}

/// Store for percent-of-par schedules.
pub trait ScheduleCache: Send + Sync {
    /// Looks up a schedule.
    fn get(&self, key: &ScheduleKey) -> Option<CashflowSchedule>;

    /// Stores a schedule.
    fn insert(&self, key: ScheduleKey, schedule: CashflowSchedule);
}

/// Cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ScheduleCache for NoCache {
    fn get(&self, _key: &ScheduleKey) -> Option<CashflowSchedule> {
        None
    }

    fn insert(&self, _key: ScheduleKey, _schedule: CashflowSchedule) {}
}

/// Concurrent in-memory schedule cache.
#[derive(Debug, Default)]
pub struct InMemoryScheduleCache {
    schedules: DashMap<ScheduleKey, CashflowSchedule>,
}

impl InMemoryScheduleCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached schedules.
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Drop every schedule for a closing date.
    pub fn evict_date(&self, closing_date: Date) {
        self.schedules.retain(|k, _| k.closing_date != closing_date);
    }

    /// Clear all schedules.
    pub fn clear(&self) {
        self.schedules.clear();
    }
}

impl ScheduleCache for InMemoryScheduleCache {
    fn get(&self, key: &ScheduleKey) -> Option<CashflowSchedule> {
        self.schedules.get(key).map(|s| s.clone())
    }

    fn insert(&self, key: ScheduleKey, schedule: CashflowSchedule) {
        self.schedules.insert(key, schedule);
    }
}
