use crate::{
    day::PruneExpiredOverridesUseCase,
    holiday::{today, LoadHolidayFeedUseCase},
    schedule::{RequestDeliveryPermissionUseCase, SyncScheduleUseCase, SyncTrigger},
    shared::usecase::execute,
};
use actix_web::rt::time::interval;
use std::time::Duration;
use tracing::info;
use wakeup_scheduler_infra::{Phase, SchedulerContext};

/// Keeps the rolling horizon moving and drops overrides that are in the past
pub fn start_regeneration_job_scheduler(ctx: SchedulerContext) {
    actix_web::rt::spawn(async move {
        let period = Duration::from_secs(ctx.config.regeneration_interval_secs.max(1));
        let mut interval = interval(period);
        loop {
            interval.tick().await;

            refresh_readiness(&ctx).await;
            let _ = execute(PruneExpiredOverridesUseCase {}, &ctx).await;
            let usecase = SyncScheduleUseCase {
                trigger: SyncTrigger::Periodic,
            };
            let _ = execute(usecase, &ctx).await;
        }
    });
}

/// Retries the readiness phases that failed, and reloads the holiday feed
/// once the year it was loaded for has passed. Phases still pending are
/// left to the startup job.
pub(crate) async fn refresh_readiness(ctx: &SchedulerContext) {
    let state = ctx.readiness.current();
    if state.delivery_permission == Phase::Unavailable {
        let _ = execute(RequestDeliveryPermissionUseCase {}, ctx).await;
    }

    if !ctx.services.holiday_feed.is_configured() {
        return;
    }
    let year = match today(ctx) {
        Some(today) => today.year(),
        None => return,
    };
    let outdated = matches!(
        ctx.services.observed_holidays.loaded_year(),
        Some(loaded) if loaded != year
    );
    if state.holiday_feed == Phase::Unavailable || outdated {
        let _ = execute(LoadHolidayFeedUseCase {}, ctx).await;
    }
}

/// Regenerates whenever the readiness signal changes
pub fn start_readiness_listener(ctx: SchedulerContext) {
    let mut rx = ctx.readiness.subscribe();
    actix_web::rt::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = *rx.borrow_and_update();
            info!("Readiness changed: {:?}", state);

            let usecase = SyncScheduleUseCase {
                trigger: SyncTrigger::Readiness,
            };
            let _ = execute(usecase, &ctx).await;
        }
    });
}

/// Resolves the two startup phases: delivery permission first, then the
/// holiday feed
pub fn start_readiness_job(ctx: SchedulerContext) {
    actix_web::rt::spawn(async move {
        let _ = execute(RequestDeliveryPermissionUseCase {}, &ctx).await;
        let _ = execute(LoadHolidayFeedUseCase {}, &ctx).await;
    });
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;
    use wakeup_scheduler_api_structs::sync_schedule::SyncStatus;
    use wakeup_scheduler_domain::{AlarmRule, Day, Recurrence, TimeOfDay};
    use wakeup_scheduler_infra::{InMemoryDelivery, StaticHolidayFeed, StaticTimeSys};

    fn tokyo_millis(year: i32, month: u32, d: u32) -> i64 {
        chrono_tz::Asia::Tokyo
            .with_ymd_and_hms(year, month, d, 6, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    async fn sync(ctx: &SchedulerContext) -> (SyncStatus, usize) {
        let usecase = SyncScheduleUseCase {
            trigger: SyncTrigger::Periodic,
        };
        let res = execute(usecase, ctx).await.unwrap();
        (res.status, res.scheduled)
    }

    #[actix_web::main]
    #[test]
    async fn retries_denied_delivery_permission() {
        let mut ctx = SchedulerContext::create_inmemory();
        let delivery = Arc::new(InMemoryDelivery::denied());
        ctx.services.delivery = delivery.clone();
        ctx.sys = Arc::new(StaticTimeSys::new(tokyo_millis(2026, 10, 18)));
        let alarm = AlarmRule::new(TimeOfDay::new(7, 0).unwrap(), Recurrence::EveryDay);
        ctx.repos.alarms.insert(&alarm).await.unwrap();

        execute(RequestDeliveryPermissionUseCase {}, &ctx).await.unwrap();
        assert_eq!(sync(&ctx).await.0, SyncStatus::NotReady);

        // Still denied, still not ready
        refresh_readiness(&ctx).await;
        assert_eq!(ctx.readiness.current().delivery_permission, Phase::Unavailable);

        delivery.set_permission(true);
        refresh_readiness(&ctx).await;
        assert!(ctx.readiness.current().can_schedule());
        let (status, scheduled) = sync(&ctx).await;
        assert_eq!(status, SyncStatus::Synced);
        assert!(scheduled > 0);
        assert_eq!(delivery.pending().len(), scheduled);
    }

    #[actix_web::main]
    #[test]
    async fn reloads_holiday_feed_in_a_new_year() {
        let mut ctx = SchedulerContext::create_inmemory();
        let sys = Arc::new(StaticTimeSys::new(tokyo_millis(2026, 10, 18)));
        ctx.sys = sys.clone();
        let later = Day::new(2028, 1, 4).unwrap();
        ctx.services.holiday_feed = Arc::new(StaticHolidayFeed::new(vec![
            Day::new(2026, 12, 29).unwrap(),
            later,
        ]));

        execute(LoadHolidayFeedUseCase {}, &ctx).await.unwrap();
        assert!(!ctx.services.observed_holidays.snapshot().contains(&later));

        // Same year, nothing to do
        refresh_readiness(&ctx).await;
        assert_eq!(ctx.services.observed_holidays.loaded_year(), Some(2026));

        sys.set(tokyo_millis(2027, 1, 2));
        refresh_readiness(&ctx).await;
        assert_eq!(ctx.services.observed_holidays.loaded_year(), Some(2027));
        assert!(ctx.services.observed_holidays.snapshot().contains(&later));
    }
}
