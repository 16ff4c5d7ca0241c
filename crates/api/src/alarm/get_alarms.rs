use crate::{
    error::SchedulerError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use wakeup_scheduler_api_structs::get_alarms::APIResponse;
use wakeup_scheduler_domain::AlarmRule;
use wakeup_scheduler_infra::SchedulerContext;

pub async fn get_alarms_controller(
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let usecase = GetAlarmsUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|alarms| HttpResponse::Ok().json(APIResponse::new(alarms)))
        .map_err(|_: ()| SchedulerError::InternalError)
}

/// Every alarm ordered by time of day. Alarms at the same time keep
/// their creation order.
#[derive(Debug)]
struct GetAlarmsUseCase {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAlarmsUseCase {
    type Response = Vec<AlarmRule>;

    type Errors = ();

    const NAME: &'static str = "GetAlarms";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let mut alarms = ctx.repos.alarms.find_all().await;
        alarms.sort_by_key(|a| a.sort_key());
        Ok(alarms)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use wakeup_scheduler_domain::{Recurrence, TimeOfDay};

    #[actix_web::main]
    #[test]
    async fn sorts_by_time_of_day() {
        let ctx = SchedulerContext::create_inmemory();
        for (hour, minute) in [(8, 0), (6, 45), (7, 0), (6, 45)] {
            let alarm = AlarmRule::new(TimeOfDay::new(hour, minute).unwrap(), Recurrence::EveryDay);
            ctx.repos.alarms.insert(&alarm).await.unwrap();
        }
        let inserted = ctx.repos.alarms.find_all().await;

        let alarms = GetAlarmsUseCase {}.execute(&ctx).await.unwrap();
        let minutes = alarms.iter().map(|a| a.sort_key()).collect::<Vec<_>>();
        assert_eq!(minutes, vec![405, 405, 420, 480]);
        assert_eq!(alarms[0].id, inserted[1].id);
        assert_eq!(alarms[1].id, inserted[3].id);
    }
}
