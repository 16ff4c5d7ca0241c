use crate::{
    error::SchedulerError,
    holiday::load_holiday_set,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use wakeup_scheduler_api_structs::dtos::HolidayDTO;
use wakeup_scheduler_api_structs::get_day_alarms::{APIResponse, PathParams};
use wakeup_scheduler_domain::{day_alarms, Day, DayAlarm, OverrideStore};
use wakeup_scheduler_infra::SchedulerContext;

pub async fn get_day_alarms_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let usecase = GetDayAlarmsUseCase { day: path.day };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.day, res.holiday, res.alarms)))
        .map_err(|_: ()| SchedulerError::InternalError)
}

/// Calendar view of a single day: every alarm with its effective time and
/// whether it fires
#[derive(Debug)]
struct GetDayAlarmsUseCase {
    pub day: Day,
}

struct UseCaseRes {
    pub day: Day,
    pub holiday: Option<HolidayDTO>,
    pub alarms: Vec<DayAlarm>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetDayAlarmsUseCase {
    type Response = UseCaseRes;

    type Errors = ();

    const NAME: &'static str = "GetDayAlarms";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let rules = ctx.repos.alarms.find_all().await;
        let overrides = OverrideStore::new(ctx.repos.day_overrides.find_all().await);
        let year = self.day.year();
        let holidays = load_holiday_set(ctx, year..=year).await;

        Ok(UseCaseRes {
            day: self.day,
            holiday: HolidayDTO::new(self.day, &holidays),
            alarms: day_alarms(
                &rules,
                &overrides,
                &holidays,
                ctx.config.holiday_policy,
                self.day,
            ),
        })
    }
}
