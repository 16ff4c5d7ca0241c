use crate::{
    error::SchedulerError,
    schedule::RegenerateScheduleSubscriber,
    shared::usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpResponse};
use tracing::warn;
use wakeup_scheduler_api_structs::delete_alarm::{APIResponse, PathParams};
use wakeup_scheduler_domain::{AlarmRule, ID};
use wakeup_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseErrors) -> SchedulerError {
    match e {
        UseCaseErrors::NotFound(alarm_id) => SchedulerError::NotFound(format!(
            "The alarm with id: {}, was not found.",
            alarm_id
        )),
        UseCaseErrors::StorageError => SchedulerError::InternalError,
    }
}

pub async fn delete_alarm_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let usecase = DeleteAlarmUseCase {
        alarm_id: path.alarm_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|alarm| HttpResponse::Ok().json(APIResponse::new(alarm)))
        .map_err(handle_error)
}

/// Removes the alarm together with all of its per-day overrides
#[derive(Debug)]
pub struct DeleteAlarmUseCase {
    pub alarm_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteAlarmUseCase {
    type Response = AlarmRule;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "DeleteAlarm";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let alarm = ctx
            .repos
            .alarms
            .delete(&self.alarm_id)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?
            .ok_or_else(|| UseCaseErrors::NotFound(self.alarm_id.clone()))?;

        if let Err(e) = ctx.repos.day_overrides.delete_by_alarm(&alarm.id).await {
            warn!(
                "Unable to delete the day overrides of alarm: {}. Error: {:?}",
                alarm.id, e
            );
        }

        Ok(alarm)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RegenerateScheduleSubscriber)]
    }
}
