//! Minimum-interval rate limiter for outbound requests.
//!
//! A [`Pacer`] hands out request slots spaced at least `interval` apart.
//! Clones share the same schedule, so concurrent fetch tasks are paced as
//! one stream of requests. The lock is held only to reserve a slot; the
//! wait happens outside it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    next_slot: Arc<Mutex<Option<Instant>>>,
}

impl Pacer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Arc::new(Mutex::new(None)),
        }
    }

    /// A pacer that never waits.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Wait for the next free request slot.
    pub async fn acquire(&self) {
        if self.interval.is_zero() {
            return;
        }
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(reserved) if reserved > now => reserved,
                _ => now,
            };
            *next = Some(slot + self.interval);
            slot
        };
        tokio::time::sleep_until(slot).await;
    }
}
