use super::IDelivery;
use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};
use wakeup_scheduler_domain::DeliveryRequest;

/// Keeps pending deliveries in memory. Used when no webhook is configured
/// and for testing.
pub struct InMemoryDelivery {
    pending: Mutex<Vec<DeliveryRequest>>,
    rejected_ids: Mutex<HashSet<String>>,
    permission_granted: AtomicBool,
    fail_cancel: bool,
}

impl InMemoryDelivery {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            rejected_ids: Mutex::new(HashSet::new()),
            permission_granted: AtomicBool::new(true),
            fail_cancel: false,
        }
    }

    pub fn denied() -> Self {
        Self {
            permission_granted: AtomicBool::new(false),
            ..Self::new()
        }
    }

    /// Fails every cancel all request
    pub fn broken() -> Self {
        Self {
            fail_cancel: true,
            ..Self::new()
        }
    }

    pub fn set_permission(&self, granted: bool) {
        self.permission_granted.store(granted, Ordering::SeqCst);
    }

    /// Makes every later submit of the given id fail
    pub fn reject(&self, id: &str) {
        self.rejected_ids.lock().unwrap().insert(id.to_string());
    }

    pub fn pending(&self) -> Vec<DeliveryRequest> {
        self.pending.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IDelivery for InMemoryDelivery {
    async fn request_permission(&self) -> bool {
        self.permission_granted.load(Ordering::SeqCst)
    }

    async fn cancel_all_pending(&self) -> anyhow::Result<()> {
        if self.fail_cancel {
            anyhow::bail!("Delivery facility is unavailable");
        }
        self.pending.lock().unwrap().clear();
        Ok(())
    }

    async fn submit(&self, request: &DeliveryRequest) -> anyhow::Result<()> {
        if self.rejected_ids.lock().unwrap().contains(&request.id) {
            anyhow::bail!("Delivery: {} was rejected", request.id);
        }
        self.pending.lock().unwrap().push(request.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wakeup_scheduler_domain::SoundVariant;

    fn request(id: &str) -> DeliveryRequest {
        DeliveryRequest {
            id: id.into(),
            fire_at: 0,
            title: "Alarm".into(),
            body: "07:00".into(),
            sound: SoundVariant::Default,
            alarm_sound: None,
        }
    }

    #[tokio::test]
    async fn records_and_cancels_pending_deliveries() {
        let delivery = InMemoryDelivery::new();
        assert!(delivery.request_permission().await);
        delivery.reject("b");

        assert!(delivery.submit(&request("a")).await.is_ok());
        assert!(delivery.submit(&request("b")).await.is_err());
        assert_eq!(delivery.pending(), vec![request("a")]);

        assert!(delivery.cancel_all_pending().await.is_ok());
        assert!(delivery.pending().is_empty());

        let denied = InMemoryDelivery::denied();
        assert!(!denied.request_permission().await);
        denied.set_permission(true);
        assert!(denied.request_permission().await);
        assert!(InMemoryDelivery::broken().cancel_all_pending().await.is_err());
    }
}
