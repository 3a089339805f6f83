//! Shared rate limiter for outbound provider calls

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::core::errors::{Result, TranslationError};

/// Counting permit pool plus a minimum spacing between dispatches.
///
/// Clones share the same pool, so one limiter bounds every caller in the
/// process.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    min_interval: Duration,
    /// Time of the most recently scheduled dispatch
    last_dispatch: Arc<Mutex<Option<Instant>>>,
}

/// Held while a provider call is in flight; the permit goes back to the pool
/// when this is dropped, on every exit path.
#[derive(Debug)]
pub struct RatePermit {
    _permit: OwnedSemaphorePermit,
}

impl RatePermit {
    /// Return the permit to the pool
    pub fn release(self) {}
}

impl RateLimiter {
    /// Create a limiter with `capacity` permits and `min_interval` spacing
    pub fn new(capacity: usize, min_interval: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            min_interval,
            last_dispatch: Arc::new(Mutex::new(None)),
        }
    }

    /// Wait for a permit, then wait out the remaining spacing.
    pub async fn acquire(&self) -> Result<RatePermit> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| TranslationError::RateLimitError {
                message: e.to_string(),
            })?;

        let dispatch_at = {
            let mut last = self.last_dispatch.lock().await;
            let now = Instant::now();
            let slot = match *last {
                Some(prev) if now.duration_since(prev) < self.min_interval => {
                    prev + self.min_interval
                }
                _ => now,
            };
            *last = Some(slot);
            slot
        };

        if dispatch_at > Instant::now() {
            debug!(
                "Rate limiting: waiting {}ms",
                dispatch_at.saturating_duration_since(Instant::now()).as_millis()
            );
            sleep_until(dispatch_at).await;
        }

        Ok(RatePermit { _permit: permit })
    }

    /// Pool size
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently handed out
    pub fn in_flight(&self) -> usize {
        self.capacity - self.semaphore.available_permits()
    }

    /// Configured spacing
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
