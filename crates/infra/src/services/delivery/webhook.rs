use super::IDelivery;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, warn};
use url::Url;
use wakeup_scheduler_domain::DeliveryRequest;

/// Forwards the schedule to an external notification service over HTTP
pub struct WebhookDelivery {
    client: Client,
    url: Url,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum WebhookMessage<'a> {
    Ping,
    CancelAll,
    Schedule { request: &'a DeliveryRequest },
}

impl WebhookDelivery {
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    async fn post(&self, message: &WebhookMessage<'_>) -> anyhow::Result<()> {
        match self
            .client
            .post(self.url.clone())
            .json(message)
            .send()
            .await
        {
            Ok(res) => {
                res.error_for_status().map_err(|e| {
                    error!(
                        "[Unexpected Response] Delivery webhook error. Error message: {:?}",
                        e
                    );
                    anyhow::Error::new(e)
                })?;
                Ok(())
            }
            Err(e) => {
                error!("[Network Error] Delivery webhook error. Error message: {:?}", e);
                Err(anyhow::Error::new(e))
            }
        }
    }
}

#[async_trait::async_trait]
impl IDelivery for WebhookDelivery {
    async fn request_permission(&self) -> bool {
        match self.post(&WebhookMessage::Ping).await {
            Ok(()) => true,
            Err(_) => {
                warn!("Delivery webhook at: {} did not accept deliveries", self.url);
                false
            }
        }
    }

    async fn cancel_all_pending(&self) -> anyhow::Result<()> {
        self.post(&WebhookMessage::CancelAll).await
    }

    async fn submit(&self, request: &DeliveryRequest) -> anyhow::Result<()> {
        self.post(&WebhookMessage::Schedule { request }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wakeup_scheduler_domain::SoundVariant;

    #[test]
    fn serializes_tagged_messages() {
        let request = DeliveryRequest {
            id: "holiday-eve:2026-11-03".into(),
            fire_at: 1793710800000,
            title: "Tomorrow is a holiday".into(),
            body: "".into(),
            sound: SoundVariant::Gentle,
            alarm_sound: None,
        };
        let json = serde_json::to_value(WebhookMessage::Schedule { request: &request }).unwrap();
        assert_eq!(json["type"], "schedule");
        assert_eq!(json["request"]["fireAt"], 1793710800000_i64);
        assert_eq!(json["request"]["sound"], "gentle");

        let json = serde_json::to_value(WebhookMessage::CancelAll).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "cancelAll" }));
    }

    #[tokio::test]
    async fn unreachable_webhook_denies_permission() {
        let delivery = WebhookDelivery::new(Url::parse("http://127.0.0.1:1/deliveries").unwrap());
        assert!(!delivery.request_permission().await);
    }
}
