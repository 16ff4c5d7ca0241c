use crate::{
    error::SchedulerError,
    schedule::RegenerateScheduleSubscriber,
    shared::usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpResponse};
use std::collections::BTreeSet;
use wakeup_scheduler_api_structs::remove_custom_holiday::{APIResponse, PathParams};
use wakeup_scheduler_domain::Day;
use wakeup_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseErrors) -> SchedulerError {
    match e {
        UseCaseErrors::NotFound(day) => SchedulerError::NotFound(format!(
            "The day: {} is not a custom holiday.",
            day
        )),
        UseCaseErrors::StorageError => SchedulerError::InternalError,
    }
}

pub async fn remove_custom_holiday_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let usecase = RemoveCustomHolidayUseCase { day: path.day };

    execute(usecase, &ctx)
        .await
        .map(|days| HttpResponse::Ok().json(APIResponse::new(days)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct RemoveCustomHolidayUseCase {
    pub day: Day,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(Day),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RemoveCustomHolidayUseCase {
    type Response = BTreeSet<Day>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "RemoveCustomHoliday";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let removed = ctx
            .repos
            .custom_holidays
            .delete(self.day)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;
        if !removed {
            return Err(UseCaseErrors::NotFound(self.day));
        }
        Ok(ctx.repos.custom_holidays.find_all().await)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RegenerateScheduleSubscriber)]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn removes_existing_and_rejects_unknown_days() {
        let ctx = SchedulerContext::create_inmemory();
        let day = Day::new(2026, 10, 21).unwrap();
        ctx.repos.custom_holidays.insert(day).await.unwrap();

        let mut usecase = RemoveCustomHolidayUseCase { day };
        assert!(usecase.execute(&ctx).await.unwrap().is_empty());
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::NotFound(_))
        ));
    }
}
