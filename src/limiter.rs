//! Per-client admission control for upstream fetches.
//!
//! Each lookup operation carries its own quota (address lookups and
//! transaction lookups are budgeted independently), enforced per client
//! identity over a rolling window. Admission is a single atomic
//! check-and-increment against governor's keyed state store, so concurrent
//! requests from one client or many clients need no external locking.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::debug;

use crate::config::Config;
use crate::models::EntryType;

/// Outcome of a rate-limit acquisition attempt. Rejection is a normal
/// outcome, not an error; the orchestrator maps it to "too many requests".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Rejected,
}

pub struct LookupLimiter {
    address: DefaultKeyedRateLimiter<String>,
    transaction: DefaultKeyedRateLimiter<String>,
}

impl LookupLimiter {
    pub fn new(config: &Config) -> Self {
        let window = config.rate_limit_window();

        Self {
            address: RateLimiter::keyed(Self::quota(config.address_rate_limit, window)),
            transaction: RateLimiter::keyed(Self::quota(config.transaction_rate_limit, window)),
        }
    }

    /// Consume one unit of the client's budget for the given operation.
    /// Never blocks.
    pub fn try_acquire(&self, client: &str, operation: EntryType) -> Admission {
        let limiter = match operation {
            EntryType::Address => &self.address,
            EntryType::Transaction => &self.transaction,
        };

        match limiter.check_key(&client.to_string()) {
            Ok(_) => Admission::Admitted,
            Err(_) => {
                debug!("rate limit exceeded for client {} on {} lookup", client, operation);
                Admission::Rejected
            }
        }
    }

    // Burst = full quota, replenished evenly across the window, so a client
    // gets at most `limit` admissions inside any window-sized span.
    fn quota(limit: u32, window: Duration) -> Quota {
        let burst = NonZeroU32::new(limit).unwrap_or(NonZeroU32::MIN);
        let period = window / burst.get();

        Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_minute(burst))
            .allow_burst(burst)
    }
}
