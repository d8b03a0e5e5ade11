//! Sliding-window throttle for outbound assessment calls.

use std::{collections::VecDeque, sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use shared::protocol::{AssessmentRequest, AssessmentResponse};
use tokio::{sync::Mutex, time::Instant};

use crate::{error::AssessmentError, AssessmentService};

pub const DEFAULT_CALLS_PER_MINUTE: usize = 15;
pub const DEFAULT_BURST_SIZE: usize = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

const WINDOW: Duration = Duration::from_secs(60);
const BURST_WINDOW: Duration = Duration::from_secs(10);
const MIN_WAIT: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiterStats {
    pub calls_in_window: usize,
    pub calls_per_minute_limit: usize,
    pub available_calls: usize,
}

/// Allows `calls_per_minute` calls per rolling minute, and at most `burst_size` of them
/// inside any rolling ten seconds.
pub struct RateLimiter {
    calls_per_minute: usize,
    burst_size: usize,
    calls: Mutex<VecDeque<Instant>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_CALLS_PER_MINUTE, DEFAULT_BURST_SIZE)
    }
}

impl RateLimiter {
    pub fn new(calls_per_minute: usize, burst_size: usize) -> Self {
        Self {
            calls_per_minute: calls_per_minute.max(1),
            burst_size: burst_size.max(1),
            calls: Mutex::new(VecDeque::new()),
        }
    }

    /// Waits for a free slot and claims it. Returns `false` without claiming when the
    /// wait would run past `timeout`; `None` waits indefinitely.
    pub async fn acquire(&self, timeout: Option<Duration>) -> bool {
        let started = Instant::now();
        loop {
            let wait = {
                let mut calls = self.calls.lock().await;
                let now = Instant::now();
                evict_expired(&mut calls, now);
                match self.wait_for_slot(&calls, now) {
                    None => {
                        calls.push_back(now);
                        return true;
                    }
                    Some(wait) => wait,
                }
            };

            let wait = match timeout {
                Some(timeout) => {
                    let elapsed = started.elapsed();
                    if elapsed + wait > timeout {
                        tracing::debug!(?wait, ?timeout, "rate limiter wait exceeds timeout");
                        return false;
                    }
                    wait.min(timeout - elapsed)
                }
                None => wait,
            };
            tokio::time::sleep(wait).await;
        }
    }

    pub async fn stats(&self) -> RateLimiterStats {
        let mut calls = self.calls.lock().await;
        evict_expired(&mut calls, Instant::now());
        RateLimiterStats {
            calls_in_window: calls.len(),
            calls_per_minute_limit: self.calls_per_minute,
            available_calls: self.calls_per_minute.saturating_sub(calls.len()),
        }
    }

    /// `None` when a call may go out now, otherwise how long until the binding limit frees.
    fn wait_for_slot(&self, calls: &VecDeque<Instant>, now: Instant) -> Option<Duration> {
        if calls.len() >= self.calls_per_minute {
            let oldest = calls.front().copied()?;
            return Some((oldest + WINDOW).saturating_duration_since(now).max(MIN_WAIT));
        }

        let recent: Vec<Instant> = calls
            .iter()
            .copied()
            .filter(|at| now.duration_since(*at) < BURST_WINDOW)
            .collect();
        if recent.len() < self.burst_size {
            return None;
        }
        let oldest_recent = recent[recent.len() - self.burst_size];
        Some(
            (oldest_recent + BURST_WINDOW)
                .saturating_duration_since(now)
                .max(MIN_WAIT),
        )
    }
}

fn evict_expired(calls: &mut VecDeque<Instant>, now: Instant) {
    while calls
        .front()
        .is_some_and(|at| now.duration_since(*at) >= WINDOW)
    {
        calls.pop_front();
    }
}

/// Gates another service behind a shared [`RateLimiter`].
pub struct RateLimitedService {
    inner: Arc<dyn AssessmentService>,
    limiter: Arc<RateLimiter>,
    acquire_timeout: Duration,
}

impl RateLimitedService {
    pub fn new(
        inner: Arc<dyn AssessmentService>,
        limiter: Arc<RateLimiter>,
        acquire_timeout: Duration,
    ) -> Self {
        Self {
            inner,
            limiter,
            acquire_timeout,
        }
    }
}

#[async_trait]
impl AssessmentService for RateLimitedService {
    async fn assess(&self, request: AssessmentRequest) -> Result<AssessmentResponse> {
        if !self.limiter.acquire(Some(self.acquire_timeout)).await {
            return Err(AssessmentError::RateLimited(self.acquire_timeout).into());
        }
        self.inner.assess(request).await
    }
}
