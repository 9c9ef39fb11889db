//! Point-budget limiter
//!
//! Each key owns a bucket of points that refills all at once when its
//! window has been open for the configured delay.

use account_common::LimiterBudget;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Instant;

use super::clock::{Clock, SystemClock};

/// Points spent by one key in the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBucket {
    pub points_consumed: u32,
    pub window_start: Instant,
}

impl RateBucket {
    fn fresh(now: Instant) -> Self {
        Self {
            points_consumed: 0,
            window_start: now,
        }
    }
}

/// Result of charging a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeOutcome {
    pub ok: bool,
    pub remaining: u32,
}

impl ChargeOutcome {
    fn accepted(remaining: u32) -> Self {
        Self { ok: true, remaining }
    }

    fn rejected(remaining: u32) -> Self {
        Self {
            ok: false,
            remaining,
        }
    }
}

/// Tracks point consumption per key against one budget
#[derive(Debug)]
pub struct PointLimiter {
    budget: LimiterBudget,
    buckets: DashMap<String, RateBucket>,
    clock: Arc<dyn Clock>,
}

impl PointLimiter {
    /// Create a limiter driven by the system clock
    #[must_use]
    pub fn new(budget: LimiterBudget) -> Self {
        Self::with_clock(budget, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(budget: LimiterBudget, clock: Arc<dyn Clock>) -> Self {
        Self {
            budget,
            buckets: DashMap::new(),
            clock,
        }
    }

    pub fn budget(&self) -> LimiterBudget {
        self.budget
    }

    /// Charge `cost` points to `key`
    ///
    /// A rejected charge leaves the bucket untouched, so retrying a
    /// rejected request never pushes the key further into debt.
    pub fn charge(&self, key: &str, cost: u32) -> ChargeOutcome {
        let now = self.clock.now();
        let max = self.budget.max_points;

        let mut bucket = match self.buckets.entry(key.to_string()) {
            Entry::Occupied(entry) => entry.into_ref(),
            Entry::Vacant(entry) => {
                if cost > max {
                    return ChargeOutcome::rejected(max);
                }
                entry.insert(RateBucket::fresh(now))
            }
        };

        let expired = now.duration_since(bucket.window_start) >= self.budget.clear_delay();
        let consumed = if expired { 0 } else { bucket.points_consumed };

        match consumed.checked_add(cost).filter(|total| *total <= max) {
            Some(total) => {
                if expired {
                    bucket.window_start = now;
                }
                bucket.points_consumed = total;
                ChargeOutcome::accepted(max - total)
            }
            None => ChargeOutcome::rejected(max.saturating_sub(consumed)),
        }
    }

    /// Points `key` could still spend right now
    pub fn remaining(&self, key: &str) -> u32 {
        let max = self.budget.max_points;
        match self.buckets.get(key) {
            Some(bucket) if !self.is_expired(&bucket) => {
                max.saturating_sub(bucket.points_consumed)
            }
            _ => max,
        }
    }

    /// Drop the bucket for a key that is gone for good
    pub fn forget(&self, key: &str) {
        self.buckets.remove(key);
    }

    /// Remove every bucket whose window has passed, returning how many went
    pub fn purge_expired(&self) -> usize {
        let before = self.buckets.len();
        self.buckets.retain(|_, bucket| !self.is_expired(bucket));
        before.saturating_sub(self.buckets.len())
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn is_expired(&self, bucket: &RateBucket) -> bool {
        self.clock.now().duration_since(bucket.window_start) >= self.budget.clear_delay()
    }
}
