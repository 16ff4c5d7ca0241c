use super::{load_holiday_set, today};
use crate::{
    error::SchedulerError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use wakeup_scheduler_api_structs::dtos::HolidayDTO;
use wakeup_scheduler_api_structs::get_holidays::{APIResponse, QueryParams};
use wakeup_scheduler_domain::Day;
use wakeup_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseErrors) -> SchedulerError {
    match e {
        UseCaseErrors::InvalidYear(year) => {
            SchedulerError::BadClientData(format!("The year: {} is not supported.", year))
        }
        UseCaseErrors::ClockOutOfRange => SchedulerError::InternalError,
    }
}

pub async fn get_holidays_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let usecase = GetHolidaysUseCase { year: query.year };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                year: res.year,
                holidays: res.holidays,
            })
        })
        .map_err(handle_error)
}

/// Every holiday of a year, defaulting to the current local year
#[derive(Debug)]
struct GetHolidaysUseCase {
    pub year: Option<i32>,
}

#[derive(Debug)]
enum UseCaseErrors {
    InvalidYear(i32),
    ClockOutOfRange,
}

struct UseCaseRes {
    pub year: i32,
    pub holidays: Vec<HolidayDTO>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetHolidaysUseCase {
    type Response = UseCaseRes;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "GetHolidays";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let year = match self.year {
            Some(year) => year,
            None => today(ctx).ok_or(UseCaseErrors::ClockOutOfRange)?.year(),
        };
        let (start, end) = match (Day::new(year, 1, 1), Day::new(year, 12, 31)) {
            (Some(start), Some(end)) if (1900..=2200).contains(&year) => (start, end),
            _ => return Err(UseCaseErrors::InvalidYear(year)),
        };

        let holidays = load_holiday_set(ctx, year..=year).await;
        let holidays = holidays
            .between(start, end)
            .into_iter()
            .filter_map(|(day, _)| HolidayDTO::new(day, &holidays))
            .collect();

        Ok(UseCaseRes { year, holidays })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;
    use wakeup_scheduler_domain::HolidayKind;
    use wakeup_scheduler_infra::StaticTimeSys;

    fn day(year: i32, month: u32, d: u32) -> Day {
        Day::new(year, month, d).unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn lists_national_and_custom_holidays_of_the_current_year() {
        let mut ctx = SchedulerContext::create_inmemory();
        let now = chrono_tz::Asia::Tokyo
            .with_ymd_and_hms(2026, 10, 18, 6, 0, 0)
            .unwrap()
            .timestamp_millis();
        ctx.sys = Arc::new(StaticTimeSys::new(now));
        ctx.repos
            .custom_holidays
            .insert(day(2026, 10, 21))
            .await
            .unwrap();

        let mut usecase = GetHolidaysUseCase { year: None };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.year, 2026);
        assert_eq!(res.holidays.len(), 19);
        assert_eq!(res.holidays[0].day, day(2026, 1, 1));
        let custom = res
            .holidays
            .iter()
            .find(|h| h.day == day(2026, 10, 21))
            .unwrap();
        assert_eq!(custom.kind, HolidayKind::Custom);
        assert_eq!(custom.name, None);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unsupported_years() {
        let ctx = SchedulerContext::create_inmemory();
        let mut usecase = GetHolidaysUseCase { year: Some(1200) };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::InvalidYear(1200))
        ));
    }
}
