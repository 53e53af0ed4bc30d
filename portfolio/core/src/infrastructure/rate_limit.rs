// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Per-Client Rate Limiter
//!
//! GCRA limiter keyed by client address. Each client gets a burst of
//! `requests_per_minute` that replenishes evenly over a minute.

use governor::clock::DefaultClock;
use governor::middleware::StateInformationMiddleware;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;

/// Seconds a limited client is told to wait.
pub const RETRY_AFTER_SECS: u64 = 60;

/// Keys tracked before stale entries are pruned.
const PRUNE_THRESHOLD: usize = 10_000;

type KeyedLimiter =
    RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock, StateInformationMiddleware>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited,
}

pub struct ClientRateLimiter {
    limiter: KeyedLimiter,
    limit: u32,
}

impl ClientRateLimiter {
    pub fn per_minute(requests_per_minute: NonZeroU32) -> Self {
        let limiter = RateLimiter::keyed(Quota::per_minute(requests_per_minute))
            .with_middleware::<StateInformationMiddleware>();
        Self {
            limiter,
            limit: requests_per_minute.get(),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn check(&self, client: &str) -> RateDecision {
        if self.limiter.len() > PRUNE_THRESHOLD {
            self.limiter.retain_recent();
        }

        match self.limiter.check_key(&client.to_string()) {
            Ok(snapshot) => RateDecision::Allowed {
                remaining: snapshot.remaining_burst_capacity(),
            },
            Err(_) => {
                tracing::debug!(client, "Rate limit exceeded");
                metrics::counter!("portfolio_rate_limited_total").increment(1);
                RateDecision::Limited
            }
        }
    }
}
