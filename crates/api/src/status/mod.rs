use actix_web::{web, HttpResponse};
use wakeup_scheduler_api_structs::get_service_health::*;
use wakeup_scheduler_infra::{Phase, SchedulerContext};

async fn status(ctx: web::Data<SchedulerContext>) -> HttpResponse {
    let readiness = ctx.readiness.current();
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
        ready: readiness.can_schedule(),
        holiday_feed: readiness.holiday_feed == Phase::Ready,
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
