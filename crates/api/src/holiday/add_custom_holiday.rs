use crate::{
    error::SchedulerError,
    schedule::RegenerateScheduleSubscriber,
    shared::usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpResponse};
use std::collections::BTreeSet;
use wakeup_scheduler_api_structs::add_custom_holiday::{APIResponse, RequestBody};
use wakeup_scheduler_domain::Day;
use wakeup_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseErrors) -> SchedulerError {
    match e {
        UseCaseErrors::StorageError => SchedulerError::InternalError,
    }
}

pub async fn add_custom_holiday_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let usecase = AddCustomHolidayUseCase { day: body.day };

    execute(usecase, &ctx)
        .await
        .map(|days| HttpResponse::Created().json(APIResponse::new(days)))
        .map_err(handle_error)
}

/// Marks a day as a personal day off. Adding a day twice is a no-op.
#[derive(Debug)]
pub struct AddCustomHolidayUseCase {
    pub day: Day,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for AddCustomHolidayUseCase {
    type Response = BTreeSet<Day>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "AddCustomHoliday";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .custom_holidays
            .insert(self.day)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;
        Ok(ctx.repos.custom_holidays.find_all().await)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RegenerateScheduleSubscriber)]
    }
}
