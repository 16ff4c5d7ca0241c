use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Pending,
    Ready,
    /// Denied or unreachable
    Unavailable,
}

/// Startup state of the external collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessState {
    pub delivery_permission: Phase,
    pub holiday_feed: Phase,
}

impl ReadinessState {
    /// Schedules are only pushed once deliveries are allowed. The holiday
    /// feed is optional and never blocks scheduling.
    pub fn can_schedule(&self) -> bool {
        self.delivery_permission == Phase::Ready
    }
}

/// Two-phase readiness signal. Listeners are woken on every change.
pub struct Readiness {
    tx: watch::Sender<ReadinessState>,
}

impl Readiness {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ReadinessState {
            delivery_permission: Phase::Pending,
            holiday_feed: Phase::Pending,
        });
        Self { tx }
    }

    pub fn current(&self) -> ReadinessState {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ReadinessState> {
        self.tx.subscribe()
    }

    pub fn set_delivery_permission(&self, phase: Phase) {
        self.tx.send_modify(|state| state.delivery_permission = phase);
    }

    pub fn set_holiday_feed(&self, phase: Phase) {
        self.tx.send_modify(|state| state.holiday_feed = phase);
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}
