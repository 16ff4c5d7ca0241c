mod delete_day_override;
mod get_day_alarms;
mod prune_expired_overrides;
mod set_day_enabled;
mod set_day_override;

use actix_web::web;
use delete_day_override::delete_day_override_controller;
use get_day_alarms::get_day_alarms_controller;
pub use prune_expired_overrides::PruneExpiredOverridesUseCase;
use set_day_enabled::set_day_enabled_controller;
use set_day_override::set_day_override_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/alarms/{alarm_id}/days/{day}",
        web::put().to(set_day_override_controller),
    );
    cfg.route(
        "/alarms/{alarm_id}/days/{day}",
        web::delete().to(delete_day_override_controller),
    );
    cfg.route("/days/{day}/enabled", web::put().to(set_day_enabled_controller));
    cfg.route("/days/{day}/alarms", web::get().to(get_day_alarms_controller));
}
