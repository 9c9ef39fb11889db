//! Per-connection rate limiting
//!
//! Two point budgets exist: one for logged-in connections and a tighter one
//! for anonymous ones. Every event charges its cost to the budget that
//! matches the caller's current login state.

mod clock;
mod limiter;

pub use clock::{Clock, ManualClock, SystemClock};
pub use limiter::{ChargeOutcome, PointLimiter, RateBucket};

use account_common::RateLimitConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Which budget a charge is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Authenticated,
    Anonymous,
}

impl AuthState {
    pub fn from_logged_in(logged_in: bool) -> Self {
        if logged_in {
            Self::Authenticated
        } else {
            Self::Anonymous
        }
    }
}

/// The pair of limiters shared by every connection
#[derive(Debug)]
pub struct RateLimiters {
    authenticated: PointLimiter,
    unauthenticated: PointLimiter,
    enabled: bool,
}

impl RateLimiters {
    /// Build both limiters; `enabled = false` lets every charge through
    #[must_use]
    pub fn new(config: &RateLimitConfig, enabled: bool) -> Self {
        Self::with_clock(config, enabled, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(config: &RateLimitConfig, enabled: bool, clock: Arc<dyn Clock>) -> Self {
        Self {
            authenticated: PointLimiter::with_clock(config.authenticated, clock.clone()),
            unauthenticated: PointLimiter::with_clock(config.unauthenticated, clock),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn limiter(&self, state: AuthState) -> &PointLimiter {
        match state {
            AuthState::Authenticated => &self.authenticated,
            AuthState::Anonymous => &self.unauthenticated,
        }
    }

    /// Charge a connection's budget for one event
    pub fn charge(&self, state: AuthState, key: &str, cost: u32) -> ChargeOutcome {
        let limiter = self.limiter(state);
        if !self.enabled {
            return ChargeOutcome {
                ok: true,
                remaining: limiter.budget().max_points,
            };
        }

        limiter.charge(key, cost)
    }

    /// Forget a closed connection in both budgets
    pub fn forget(&self, key: &str) {
        self.authenticated.forget(key);
        self.unauthenticated.forget(key);
    }

    pub fn purge_expired(&self) -> usize {
        self.authenticated.purge_expired() + self.unauthenticated.purge_expired()
    }

    /// Periodically drop buckets whose window has passed
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let purged = self.purge_expired();
                if purged > 0 {
                    tracing::trace!(purged, "Expired rate limit buckets removed");
                }
            }
        })
    }
}
