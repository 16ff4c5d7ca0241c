mod add_custom_holiday;
mod get_holidays;
mod load_holiday_feed;
mod remove_custom_holiday;

use actix_web::web;
use add_custom_holiday::add_custom_holiday_controller;
use get_holidays::get_holidays_controller;
pub use load_holiday_feed::LoadHolidayFeedUseCase;
use remove_custom_holiday::remove_custom_holiday_controller;
use std::ops::RangeInclusive;
use wakeup_scheduler_domain::{Day, HolidayCalculator, HolidaySet};
use wakeup_scheduler_infra::SchedulerContext;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/holidays", web::get().to(get_holidays_controller));
    cfg.route(
        "/holidays/custom",
        web::post().to(add_custom_holiday_controller),
    );
    cfg.route(
        "/holidays/custom/{day}",
        web::delete().to(remove_custom_holiday_controller),
    );
}

/// National holidays for `years` together with the user's custom days and
/// whatever the holiday feed last reported
pub(crate) async fn load_holiday_set(
    ctx: &SchedulerContext,
    years: RangeInclusive<i32>,
) -> HolidaySet {
    let custom = ctx.repos.custom_holidays.find_all().await;
    let observed = ctx.services.observed_holidays.snapshot();
    HolidayCalculator::new().holiday_set(years, custom, observed)
}

/// The current local date in the configured timezone
pub(crate) fn today(ctx: &SchedulerContext) -> Option<Day> {
    Day::from_timestamp_millis(ctx.sys.get_timestamp_millis(), &ctx.config.timezone)
}
