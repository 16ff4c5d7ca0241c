use crate::{
    error::SchedulerError,
    schedule::RegenerateScheduleSubscriber,
    shared::usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpResponse};
use wakeup_scheduler_api_structs::set_day_override::{APIResponse, PathParams, RequestBody};
use wakeup_scheduler_domain::{Day, DayOverride, DayOverrideChange, ID};
use wakeup_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseErrors) -> SchedulerError {
    match e {
        UseCaseErrors::AlarmNotFound(alarm_id) => SchedulerError::NotFound(format!(
            "The alarm with id: {}, was not found.",
            alarm_id
        )),
        UseCaseErrors::StorageError => SchedulerError::InternalError,
    }
}

pub async fn set_day_override_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let path = path.into_inner();
    let body = body.into_inner();
    let usecase = SetDayOverrideUseCase {
        alarm_id: path.alarm_id,
        day: path.day,
        change: DayOverrideChange {
            enabled: body.enabled,
            time: body.time,
            one_off: body.one_off,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|day_override| HttpResponse::Ok().json(APIResponse::new(day_override)))
        .map_err(handle_error)
}

/// Changes the override of one alarm on one day. The enabled and time
/// overrides are updated independently. An override left without any fields
/// is removed, which restores the plain rule for that day.
#[derive(Debug)]
pub struct SetDayOverrideUseCase {
    pub alarm_id: ID,
    pub day: Day,
    pub change: DayOverrideChange,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    AlarmNotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetDayOverrideUseCase {
    type Response = DayOverride;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "SetDayOverride";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        if ctx.repos.alarms.find(&self.alarm_id).await.is_none() {
            return Err(UseCaseErrors::AlarmNotFound(self.alarm_id.clone()));
        }

        ctx.repos
            .day_overrides
            .apply_change(&self.alarm_id, self.day, &self.change)
            .await
            .map_err(|_| UseCaseErrors::StorageError)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RegenerateScheduleSubscriber)]
    }
}
