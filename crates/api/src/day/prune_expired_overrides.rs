use crate::holiday::today;
use crate::shared::usecase::UseCase;
use tracing::info;
use wakeup_scheduler_infra::SchedulerContext;

/// Drops per-day overrides dated before today
#[derive(Debug)]
pub struct PruneExpiredOverridesUseCase {}

#[derive(Debug)]
pub enum UseCaseErrors {
    ClockOutOfRange,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for PruneExpiredOverridesUseCase {
    type Response = usize;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "PruneExpiredOverrides";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let today = today(ctx).ok_or(UseCaseErrors::ClockOutOfRange)?;
        let pruned = ctx
            .repos
            .day_overrides
            .delete_before(today)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;
        if pruned > 0 {
            info!("Pruned {} day overrides dated before {}", pruned, today);
        }
        Ok(pruned)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;
    use wakeup_scheduler_domain::{Day, DayOverride, ID};
    use wakeup_scheduler_infra::StaticTimeSys;

    #[actix_web::main]
    #[test]
    async fn keeps_today_and_later() {
        let mut ctx = SchedulerContext::create_inmemory();
        let now = chrono_tz::Asia::Tokyo
            .with_ymd_and_hms(2026, 10, 18, 0, 30, 0)
            .unwrap()
            .timestamp_millis();
        ctx.sys = Arc::new(StaticTimeSys::new(now));
        let alarm_id = ID::default();
        for d in [16, 17, 18, 19] {
            let mut o = DayOverride::new(&alarm_id, Day::new(2026, 10, d).unwrap());
            o.enabled = Some(false);
            ctx.repos.day_overrides.save(&o).await.unwrap();
        }

        let pruned = PruneExpiredOverridesUseCase {}.execute(&ctx).await.unwrap();
        assert_eq!(pruned, 2);
        let days = ctx
            .repos
            .day_overrides
            .find_all()
            .await
            .into_iter()
            .map(|o| o.day.day())
            .collect::<Vec<_>>();
        assert_eq!(days, vec![18, 19]);
    }
}
