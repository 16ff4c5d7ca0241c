use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard};
use wakeup_scheduler_domain::ScheduledEvent;

/// The batch of events currently handed to the delivery facility
#[derive(Debug, Clone, Default)]
pub struct LiveBatch {
    pub events: Vec<ScheduledEvent>,
    /// Timestamp in millis of the pass that produced this batch
    pub generated_at: Option<i64>,
    /// Number of batches installed so far
    pub generation: u64,
}

/// Serializes schedule passes. Every pass that runs takes a ticket, and only the
/// holder of the newest ticket may install a batch.
#[derive(Default)]
pub struct ScheduleState {
    latest_request: AtomicU64,
    batch: Mutex<LiveBatch>,
}

impl ScheduleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new pass, superseding every older one
    pub fn request(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest_request.load(Ordering::SeqCst) == ticket
    }

    /// Waits for exclusive access to the live batch. Gives `None` when a
    /// newer pass was requested in the meantime.
    pub async fn acquire(&self, ticket: u64) -> Option<MutexGuard<'_, LiveBatch>> {
        let guard = self.batch.lock().await;
        if !self.is_latest(ticket) {
            return None;
        }
        Some(guard)
    }

    pub async fn snapshot(&self) -> LiveBatch {
        self.batch.lock().await.clone()
    }
}
