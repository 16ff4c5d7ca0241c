mod get_schedule;
mod request_delivery_permission;
mod subscribers;
mod sync_schedule;

use actix_web::web;
use get_schedule::get_schedule_controller;
pub use request_delivery_permission::RequestDeliveryPermissionUseCase;
pub use subscribers::RegenerateScheduleSubscriber;
use sync_schedule::sync_schedule_controller;
pub use sync_schedule::{SyncScheduleUseCase, SyncTrigger};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/schedule", web::get().to(get_schedule_controller));
    cfg.route("/schedule/sync", web::post().to(sync_schedule_controller));
}
