// Request pacing for the language-model API.
//
// Chat-completion endpoints throttle per account. Requests are spaced at
// least `1 / requests_per_second` apart; callers that arrive early sleep
// until their slot. Concurrent callers share one limiter through the Arc.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<Pacing>>,
}

struct Pacing {
    /// Minimum gap between requests; `None` disables pacing
    interval: Option<Duration>,
    /// When the next request may go out
    next_slot: Option<Instant>,
}

impl RateLimiter {
    /// Allow at most `requests_per_second`. Non-positive or non-finite rates
    /// disable pacing.
    pub fn new(requests_per_second: f64) -> Self {
        let interval = (requests_per_second.is_finite() && requests_per_second > 0.0)
            .then(|| Duration::from_secs_f64(1.0 / requests_per_second));
        Self {
            inner: Arc::new(Mutex::new(Pacing {
                interval,
                next_slot: None,
            })),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(0.0)
    }

    /// Wait for this caller's slot.
    ///
    /// The slot is reserved under the lock and the sleep happens after the
    /// lock is released, so waiting callers queue in arrival order.
    pub async fn acquire(&self) {
        let wait_until = {
            let mut pacing = self.inner.lock().await;
            let Some(interval) = pacing.interval else {
                return;
            };
            let now = Instant::now();
            let slot = match pacing.next_slot {
                Some(next) if next > now => next,
                _ => now,
            };
            pacing.next_slot = Some(slot + interval);
            slot
        };
        tokio::time::sleep_until(wait_until).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_request_is_immediate() {
        let limiter = RateLimiter::new(1.0);
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_second_request_waits_for_interval() {
        let limiter = RateLimiter::new(4.0); // 250ms apart
        limiter.acquire().await;
        let start = Instant::now();
        limiter.acquire().await;
        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_millis(200),
            "Expected ~250ms delay, got {:?}",
            elapsed
        );
    }

    #[tokio::test]
    async fn test_unlimited_never_waits() {
        let limiter = RateLimiter::unlimited();
        let start = Instant::now();
        for _ in 0..20 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_concurrent_callers_are_spaced() {
        let limiter = RateLimiter::new(10.0); // 100ms apart
        let start = Instant::now();
        let a = limiter.clone();
        let b = limiter.clone();
        let c = limiter.clone();
        tokio::join!(a.acquire(), b.acquire(), c.acquire());
        // Three slots: now, +100ms, +200ms
        assert!(start.elapsed() >= Duration::from_millis(180));
    }
}
