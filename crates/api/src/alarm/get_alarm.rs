use crate::{
    error::SchedulerError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use wakeup_scheduler_api_structs::get_alarm::{APIResponse, PathParams};
use wakeup_scheduler_domain::{AlarmRule, ID};
use wakeup_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseErrors) -> SchedulerError {
    match e {
        UseCaseErrors::NotFound(alarm_id) => SchedulerError::NotFound(format!(
            "The alarm with id: {}, was not found.",
            alarm_id
        )),
    }
}

pub async fn get_alarm_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let usecase = GetAlarmUseCase {
        alarm_id: path.alarm_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|alarm| HttpResponse::Ok().json(APIResponse::new(alarm)))
        .map_err(handle_error)
}

#[derive(Debug)]
struct GetAlarmUseCase {
    pub alarm_id: ID,
}

#[derive(Debug)]
enum UseCaseErrors {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAlarmUseCase {
    type Response = AlarmRule;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "GetAlarm";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        match ctx.repos.alarms.find(&self.alarm_id).await {
            Some(alarm) => Ok(alarm),
            None => Err(UseCaseErrors::NotFound(self.alarm_id.clone())),
        }
    }
}
