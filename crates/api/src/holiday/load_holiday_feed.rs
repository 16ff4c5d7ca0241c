use super::today;
use crate::shared::usecase::UseCase;
use tracing::{info, warn};
use wakeup_scheduler_domain::Day;
use wakeup_scheduler_infra::{Phase, SchedulerContext};

/// Fetches observed holidays for the current and the next year. A failed
/// fetch keeps whatever was loaded before.
#[derive(Debug)]
pub struct LoadHolidayFeedUseCase {}

#[async_trait::async_trait(?Send)]
impl UseCase for LoadHolidayFeedUseCase {
    type Response = Phase;

    type Errors = ();

    const NAME: &'static str = "LoadHolidayFeed";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let year = today(ctx).ok_or(())?.year();
        let (start, end) = match (Day::new(year, 1, 1), Day::new(year + 1, 12, 31)) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(()),
        };

        let phase = match ctx.services.holiday_feed.holidays_between(start, end).await {
            Some(days) => {
                info!("Loaded {} observed holidays between {} and {}", days.len(), start, end);
                ctx.services.observed_holidays.replace(year, days);
                Phase::Ready
            }
            None => {
                warn!("Holiday feed unavailable, using computed holidays only");
                Phase::Unavailable
            }
        };
        ctx.readiness.set_holiday_feed(phase);
        Ok(phase)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;
    use wakeup_scheduler_infra::{StaticHolidayFeed, StaticTimeSys};

    fn day(year: i32, month: u32, d: u32) -> Day {
        Day::new(year, month, d).unwrap()
    }

    fn context() -> SchedulerContext {
        let mut ctx = SchedulerContext::create_inmemory();
        let now = chrono_tz::Asia::Tokyo
            .with_ymd_and_hms(2026, 10, 18, 6, 0, 0)
            .unwrap()
            .timestamp_millis();
        ctx.sys = Arc::new(StaticTimeSys::new(now));
        ctx
    }

    #[actix_web::main]
    #[test]
    async fn stores_feed_days_within_two_years() {
        let mut ctx = context();
        ctx.services.holiday_feed = Arc::new(StaticHolidayFeed::new(vec![
            day(2025, 12, 31),
            day(2026, 12, 29),
            day(2027, 12, 30),
            day(2028, 1, 3),
        ]));

        let mut usecase = LoadHolidayFeedUseCase {};
        assert_eq!(usecase.execute(&ctx).await, Ok(Phase::Ready));
        assert_eq!(
            ctx.services
                .observed_holidays
                .snapshot()
                .into_iter()
                .collect::<Vec<_>>(),
            vec![day(2026, 12, 29), day(2027, 12, 30)]
        );
        assert_eq!(ctx.readiness.current().holiday_feed, Phase::Ready);
        assert_eq!(ctx.services.observed_holidays.loaded_year(), Some(2026));
    }

    #[actix_web::main]
    #[test]
    async fn missing_feed_keeps_previous_days() {
        let ctx = context();
        ctx.services
            .observed_holidays
            .replace(2026, vec![day(2026, 12, 29)]);

        let mut usecase = LoadHolidayFeedUseCase {};
        assert_eq!(usecase.execute(&ctx).await, Ok(Phase::Unavailable));
        assert_eq!(ctx.services.observed_holidays.snapshot().len(), 1);
        assert_eq!(ctx.readiness.current().holiday_feed, Phase::Unavailable);
    }
}
