use crate::{
    error::SchedulerError,
    schedule::RegenerateScheduleSubscriber,
    shared::usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpResponse};
use wakeup_scheduler_api_structs::set_day_enabled::{APIResponse, PathParams, RequestBody};
use wakeup_scheduler_domain::{Day, DayOverride};
use wakeup_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseErrors) -> SchedulerError {
    match e {
        UseCaseErrors::StorageError => SchedulerError::InternalError,
    }
}

pub async fn set_day_enabled_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let usecase = SetDayEnabledUseCase {
        day: path.day,
        enabled: body.enabled,
    };

    execute(usecase, &ctx)
        .await
        .map(|day_overrides| HttpResponse::Ok().json(APIResponse::new(day_overrides)))
        .map_err(handle_error)
}

/// Turns every alarm on or off for a single day, e.g. "no alarms tomorrow"
#[derive(Debug)]
pub struct SetDayEnabledUseCase {
    pub day: Day,
    pub enabled: bool,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetDayEnabledUseCase {
    type Response = Vec<DayOverride>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "SetDayEnabled";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let alarm_ids = ctx
            .repos
            .alarms
            .find_all()
            .await
            .into_iter()
            .map(|a| a.id)
            .collect::<Vec<_>>();

        ctx.repos
            .day_overrides
            .set_all_enabled(&alarm_ids, self.day, self.enabled)
            .await
            .map_err(|_| UseCaseErrors::StorageError)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RegenerateScheduleSubscriber)]
    }
}
