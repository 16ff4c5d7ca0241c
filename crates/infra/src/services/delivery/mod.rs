mod inmemory;
mod webhook;

pub use inmemory::InMemoryDelivery;
pub use webhook::WebhookDelivery;
use wakeup_scheduler_domain::DeliveryRequest;

/// The notification facility that fires the computed schedule
#[async_trait::async_trait]
pub trait IDelivery: Send + Sync {
    /// Whether deliveries are allowed at all
    async fn request_permission(&self) -> bool;
    async fn cancel_all_pending(&self) -> anyhow::Result<()>;
    async fn submit(&self, request: &DeliveryRequest) -> anyhow::Result<()>;
}
