use crate::{
    error::SchedulerError,
    holiday::load_holiday_set,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use tracing::{info, warn};
use wakeup_scheduler_api_structs::sync_schedule::{APIResponse, SyncStatus};
use wakeup_scheduler_domain::{HorizonScheduler, OverrideStore};
use wakeup_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseErrors) -> SchedulerError {
    match e {
        UseCaseErrors::DeliveryUnavailable(e) => SchedulerError::Unavailable(e),
    }
}

pub async fn sync_schedule_controller(
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let usecase = SyncScheduleUseCase {
        trigger: SyncTrigger::Manual,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                status: res.status,
                scheduled: res.scheduled,
                rejected: res.rejected,
            })
        })
        .map_err(handle_error)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    /// Rules, overrides or holidays changed
    Modified,
    Periodic,
    Readiness,
    Manual,
}

/// Recomputes the whole horizon and replaces the live batch with it
#[derive(Debug)]
pub struct SyncScheduleUseCase {
    pub trigger: SyncTrigger,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    /// The previous batch could not be cancelled, so nothing new was submitted
    DeliveryUnavailable(String),
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub status: SyncStatus,
    pub scheduled: usize,
    pub rejected: usize,
}

impl UseCaseRes {
    fn skipped(status: SyncStatus) -> Self {
        Self {
            status,
            scheduled: 0,
            rejected: 0,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncScheduleUseCase {
    type Response = UseCaseRes;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "SyncSchedule";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        if !ctx.readiness.current().can_schedule() {
            info!(
                "Skipping schedule sync triggered by {:?}, deliveries are not permitted yet",
                self.trigger
            );
            return Ok(UseCaseRes::skipped(SyncStatus::NotReady));
        }
        // Only a pass that will actually run may supersede queued ones
        let ticket = ctx.schedule.request();

        let mut batch = match ctx.schedule.acquire(ticket).await {
            Some(batch) => batch,
            None => return Ok(UseCaseRes::skipped(SyncStatus::Superseded)),
        };

        let now = ctx.sys.get_timestamp_millis();
        let scheduler = HorizonScheduler::new(ctx.config.schedule_settings());
        let horizon = scheduler.horizon(now);
        let (first, last) = match (horizon.first(), horizon.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Ok(UseCaseRes::skipped(SyncStatus::Synced)),
        };

        let rules = ctx.repos.alarms.find_all().await;
        let overrides = OverrideStore::new(ctx.repos.day_overrides.find_all().await);
        let holidays = load_holiday_set(ctx, first.year()..=last.year()).await;
        let events = scheduler.plan(&rules, &overrides, &holidays, now);

        ctx.services
            .delivery
            .cancel_all_pending()
            .await
            .map_err(|e| UseCaseErrors::DeliveryUnavailable(e.to_string()))?;
        batch.events.clear();

        let mut rejected = 0;
        let mut accepted = Vec::with_capacity(events.len());
        for event in events {
            match ctx.services.delivery.submit(&event.delivery_request()).await {
                Ok(()) => accepted.push(event),
                Err(e) => {
                    warn!("Delivery of event: {} was rejected: {:?}", event.id, e);
                    rejected += 1;
                }
            }
        }

        batch.events = accepted;
        batch.generated_at = Some(now);
        batch.generation += 1;
        info!(
            "Schedule generation {} installed with {} events ({} rejected), triggered by {:?}",
            batch.generation,
            batch.events.len(),
            rejected,
            self.trigger
        );

        Ok(UseCaseRes {
            status: SyncStatus::Synced,
            scheduled: batch.events.len(),
            rejected,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;
    use wakeup_scheduler_domain::{AlarmRule, Recurrence, TimeOfDay};
    use wakeup_scheduler_infra::{InMemoryDelivery, Phase, StaticTimeSys};

    fn context(delivery: Arc<InMemoryDelivery>) -> SchedulerContext {
        let mut ctx = SchedulerContext::create_inmemory();
        ctx.services.delivery = delivery;
        // Sunday 2026-10-18 06:00 in Tokyo
        let now = chrono_tz::Asia::Tokyo
            .with_ymd_and_hms(2026, 10, 18, 6, 0, 0)
            .unwrap()
            .timestamp_millis();
        ctx.sys = Arc::new(StaticTimeSys::new(now));
        ctx
    }

    async fn sync(ctx: &SchedulerContext) -> Result<UseCaseRes, UseCaseErrors> {
        let mut usecase = SyncScheduleUseCase {
            trigger: SyncTrigger::Manual,
        };
        usecase.execute(ctx).await
    }

    #[actix_web::main]
    #[test]
    async fn installs_the_planned_batch() {
        let delivery = Arc::new(InMemoryDelivery::new());
        let ctx = context(delivery.clone());
        let mut alarm = AlarmRule::new(TimeOfDay::new(7, 0).unwrap(), Recurrence::EveryDay);
        alarm.snooze_enabled = true;
        ctx.repos.alarms.insert(&alarm).await.unwrap();

        let res = sync(&ctx).await.unwrap();
        assert_eq!(res.status, SyncStatus::Synced);
        assert_eq!(res.scheduled, ctx.config.horizon_days as usize * 4);
        assert_eq!(delivery.pending().len(), res.scheduled);

        let batch = ctx.schedule.snapshot().await;
        assert_eq!(batch.generation, 1);
        assert_eq!(batch.events.len(), res.scheduled);
    }

    #[actix_web::main]
    #[test]
    async fn regeneration_replaces_instead_of_duplicating() {
        let delivery = Arc::new(InMemoryDelivery::new());
        let ctx = context(delivery.clone());
        let alarm = AlarmRule::new(TimeOfDay::new(7, 0).unwrap(), Recurrence::EveryDay);
        ctx.repos.alarms.insert(&alarm).await.unwrap();

        sync(&ctx).await.unwrap();
        let first = delivery.pending();
        sync(&ctx).await.unwrap();
        assert_eq!(delivery.pending(), first);
        assert_eq!(ctx.schedule.snapshot().await.generation, 2);
    }

    #[actix_web::main]
    #[test]
    async fn rejected_events_are_skipped() {
        let delivery = Arc::new(InMemoryDelivery::new());
        let ctx = context(delivery.clone());
        let alarm = AlarmRule::new(TimeOfDay::new(7, 0).unwrap(), Recurrence::EveryDay);
        ctx.repos.alarms.insert(&alarm).await.unwrap();
        delivery.reject(&format!("alarm:{}:2026-10-19:primary", alarm.id));

        let res = sync(&ctx).await.unwrap();
        assert_eq!(res.rejected, 1);
        assert_eq!(res.scheduled, ctx.config.horizon_days as usize - 1);
        assert_eq!(delivery.pending().len(), res.scheduled);
    }

    #[actix_web::main]
    #[test]
    async fn skips_until_deliveries_are_permitted() {
        let delivery = Arc::new(InMemoryDelivery::new());
        let ctx = context(delivery.clone());
        ctx.readiness.set_delivery_permission(Phase::Pending);
        let alarm = AlarmRule::new(TimeOfDay::new(7, 0).unwrap(), Recurrence::EveryDay);
        ctx.repos.alarms.insert(&alarm).await.unwrap();

        let res = sync(&ctx).await.unwrap();
        assert_eq!(res.status, SyncStatus::NotReady);
        assert!(delivery.pending().is_empty());
        assert_eq!(ctx.schedule.snapshot().await.generation, 0);
    }

    #[actix_web::main]
    #[test]
    async fn skipped_pass_does_not_supersede_a_queued_one() {
        let delivery = Arc::new(InMemoryDelivery::new());
        let ctx = context(delivery.clone());
        let alarm = AlarmRule::new(TimeOfDay::new(7, 0).unwrap(), Recurrence::EveryDay);
        ctx.repos.alarms.insert(&alarm).await.unwrap();
        let ticket = ctx.schedule.request();

        ctx.readiness.set_delivery_permission(Phase::Unavailable);
        assert_eq!(sync(&ctx).await.unwrap().status, SyncStatus::NotReady);
        assert!(ctx.schedule.is_latest(ticket));
    }

    #[actix_web::main]
    #[test]
    async fn fails_when_previous_batch_cannot_be_cancelled() {
        let delivery = Arc::new(InMemoryDelivery::broken());
        let ctx = context(delivery.clone());
        let alarm = AlarmRule::new(TimeOfDay::new(7, 0).unwrap(), Recurrence::EveryDay);
        ctx.repos.alarms.insert(&alarm).await.unwrap();

        assert!(sync(&ctx).await.is_err());
        assert!(delivery.pending().is_empty());
    }
}
