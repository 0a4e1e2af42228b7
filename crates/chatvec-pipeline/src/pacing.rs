use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chatvec_core::config::PacingSettings;
use chatvec_core::traits::RateLimiter;

/// Sleeps a fixed time after each item and each batch.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    pub item: Duration,
    pub batch: Duration,
}

impl FixedDelay {
    pub fn from_settings(s: &PacingSettings) -> Self { Self { item: s.item_delay(), batch: s.batch_delay() } }
}

impl RateLimiter for FixedDelay {
    async fn after_item(&self) {
        if !self.item.is_zero() { tokio::time::sleep(self.item).await; }
    }

    async fn after_batch(&self) {
        if !self.batch.is_zero() { tokio::time::sleep(self.batch).await; }
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl RateLimiter for NoDelay {
    async fn after_item(&self) {}
    async fn after_batch(&self) {}
}

/// Never waits, but counts how often it was asked to.
#[derive(Debug, Default)]
pub struct CountingLimiter {
    items: AtomicUsize,
    batches: AtomicUsize,
}

impl CountingLimiter {
    pub fn items(&self) -> usize { self.items.load(Ordering::Relaxed) }
    pub fn batches(&self) -> usize { self.batches.load(Ordering::Relaxed) }
}

impl RateLimiter for CountingLimiter {
    async fn after_item(&self) { self.items.fetch_add(1, Ordering::Relaxed); }
    async fn after_batch(&self) { self.batches.fetch_add(1, Ordering::Relaxed); }
}
