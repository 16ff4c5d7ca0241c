use crate::{
    error::SchedulerError,
    schedule::RegenerateScheduleSubscriber,
    shared::usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpResponse};
use wakeup_scheduler_api_structs::delete_day_override::{APIResponse, PathParams};
use wakeup_scheduler_domain::{Day, DayOverride, ID};
use wakeup_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseErrors) -> SchedulerError {
    match e {
        UseCaseErrors::NotFound(alarm_id, day) => SchedulerError::NotFound(format!(
            "The alarm with id: {} has no override on {}.",
            alarm_id, day
        )),
        UseCaseErrors::StorageError => SchedulerError::InternalError,
    }
}

pub async fn delete_day_override_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let path = path.into_inner();
    let usecase = DeleteDayOverrideUseCase {
        alarm_id: path.alarm_id,
        day: path.day,
    };

    execute(usecase, &ctx)
        .await
        .map(|day_override| HttpResponse::Ok().json(APIResponse::new(day_override)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct DeleteDayOverrideUseCase {
    pub alarm_id: ID,
    pub day: Day,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID, Day),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteDayOverrideUseCase {
    type Response = DayOverride;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "DeleteDayOverride";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .day_overrides
            .delete(&self.alarm_id, self.day)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?
            .ok_or_else(|| UseCaseErrors::NotFound(self.alarm_id.clone(), self.day))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RegenerateScheduleSubscriber)]
    }
}
