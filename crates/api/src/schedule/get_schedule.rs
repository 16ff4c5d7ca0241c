use crate::{error::SchedulerError, shared::usecase::{execute, UseCase}};
use actix_web::{web, HttpResponse};
use wakeup_scheduler_api_structs::get_schedule::APIResponse;
use wakeup_scheduler_infra::{LiveBatch, SchedulerContext};

pub async fn get_schedule_controller(
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let usecase = GetScheduleUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(
                res.batch.generation,
                res.batch.generated_at,
                res.ready,
                res.batch.events,
            ))
        })
        .map_err(|_: ()| SchedulerError::InternalError)
}

#[derive(Debug)]
struct GetScheduleUseCase {}

struct UseCaseRes {
    pub batch: LiveBatch,
    pub ready: bool,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetScheduleUseCase {
    type Response = UseCaseRes;

    type Errors = ();

    const NAME: &'static str = "GetSchedule";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        Ok(UseCaseRes {
            batch: ctx.schedule.snapshot().await,
            ready: ctx.readiness.current().can_schedule(),
        })
    }
}
