// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-client rate limiting

use governor::{DefaultKeyedRateLimiter, Quota};
use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use super::errors::ApiError;

const MIN_WINDOW: Duration = Duration::from_millis(1);

/// Counters for one accounting window
struct Window {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    started: Instant,
}

/// Rate limiter keyed by client IP address
///
/// Fixed windows: each address gets `max_requests` per `window`, and every
/// counter is dropped when the window ends. Within a window the governor
/// quota earns back a request no faster than once per `window`, so it never
/// refills before the boundary clears it.
pub struct ClientRateLimiter {
    current: RwLock<Window>,
    quota: Quota,
    max_requests: u32,
    window: Duration,
}

impl ClientRateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    /// * `max_requests` - Requests allowed per client within `window`
    /// * `window` - Length of the accounting window
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let burst = NonZeroU32::new(max_requests).unwrap_or(NonZeroU32::MIN);
        let window = window.max(MIN_WINDOW);
        let quota = Quota::with_period(window)
            .unwrap_or_else(|| Quota::per_minute(NonZeroU32::MIN))
            .allow_burst(burst);

        Self {
            current: RwLock::new(Window {
                limiter: Arc::new(DefaultKeyedRateLimiter::keyed(quota)),
                started: Instant::now(),
            }),
            quota,
            max_requests: burst.get(),
            window,
        }
    }

    /// Check if a request from `client` is allowed
    ///
    /// Returns `ApiError::RateLimitExceeded` with the number of seconds until
    /// the current window ends.
    pub fn check(&self, client: IpAddr) -> Result<(), ApiError> {
        let (limiter, started) = self.current();
        limiter.check_key(&client).map_err(|_| {
            let remaining = self.window.saturating_sub(started.elapsed());
            ApiError::RateLimitExceeded {
                retry_after: remaining.as_secs_f64().ceil().max(1.0) as u64,
            }
        })
    }

    /// Forget every client's request history and start a new window now
    pub fn reset(&self) {
        let fresh = self.fresh_window(Instant::now());
        match self.current.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
    }

    /// Number of clients seen in the current window
    pub fn tracked_clients(&self) -> usize {
        self.current().0.len()
    }

    /// Get the configured requests per window
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Get the configured window
    pub fn window(&self) -> Duration {
        self.window
    }

    fn fresh_window(&self, started: Instant) -> Window {
        Window {
            limiter: Arc::new(DefaultKeyedRateLimiter::keyed(self.quota)),
            started,
        }
    }

    /// Limiter for the current window, rolling over to a fresh one when the
    /// previous window has ended
    fn current(&self) -> (Arc<DefaultKeyedRateLimiter<IpAddr>>, Instant) {
        {
            let guard = match self.current.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if guard.started.elapsed() < self.window {
                return (guard.limiter.clone(), guard.started);
            }
        }

        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = Instant::now();
        let elapsed = now.duration_since(guard.started);
        if elapsed >= self.window {
            // Windows stay aligned to the first one
            let offset = elapsed.as_nanos() % self.window.as_nanos();
            let started = now - Duration::from_nanos(offset as u64);
            *guard = self.fresh_window(started);
        }
        (guard.limiter.clone(), guard.started)
    }
}
