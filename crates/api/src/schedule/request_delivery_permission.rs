use crate::shared::usecase::UseCase;
use tracing::{info, warn};
use wakeup_scheduler_infra::{Phase, SchedulerContext};

/// Asks the delivery facility whether alarms may be delivered and
/// records the answer in the readiness signal
#[derive(Debug)]
pub struct RequestDeliveryPermissionUseCase {}

#[async_trait::async_trait(?Send)]
impl UseCase for RequestDeliveryPermissionUseCase {
    type Response = Phase;

    type Errors = ();

    const NAME: &'static str = "RequestDeliveryPermission";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let phase = if ctx.services.delivery.request_permission().await {
            info!("Delivery permission granted");
            Phase::Ready
        } else {
            warn!("Delivery permission was not granted, schedules will not be delivered");
            Phase::Unavailable
        };
        ctx.readiness.set_delivery_permission(phase);
        Ok(phase)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;
    use wakeup_scheduler_infra::InMemoryDelivery;

    #[actix_web::main]
    #[test]
    async fn records_permission_in_readiness() {
        let mut ctx = SchedulerContext::create_inmemory();
        ctx.readiness.set_delivery_permission(Phase::Pending);
        let mut usecase = RequestDeliveryPermissionUseCase {};
        assert_eq!(usecase.execute(&ctx).await, Ok(Phase::Ready));
        assert!(ctx.readiness.current().can_schedule());

        ctx.services.delivery = Arc::new(InMemoryDelivery::denied());
        assert_eq!(usecase.execute(&ctx).await, Ok(Phase::Unavailable));
        assert!(!ctx.readiness.current().can_schedule());
    }
}
