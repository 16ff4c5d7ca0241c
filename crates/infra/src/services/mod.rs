mod delivery;
mod holiday_feed;
mod readiness;

pub use delivery::{IDelivery, InMemoryDelivery, WebhookDelivery};
pub use holiday_feed::{
    parse_ics_dates, IHolidayFeed, IcsHolidayFeed, NoHolidayFeed, ObservedHolidays,
    StaticHolidayFeed,
};
pub use readiness::{Phase, Readiness, ReadinessState};
use std::sync::Arc;

#[derive(Clone)]
pub struct Services {
    pub delivery: Arc<dyn IDelivery>,
    pub holiday_feed: Arc<dyn IHolidayFeed>,
    pub observed_holidays: Arc<ObservedHolidays>,
}

impl Services {
    pub fn create_inmemory() -> Self {
        Self {
            delivery: Arc::new(InMemoryDelivery::new()),
            holiday_feed: Arc::new(NoHolidayFeed {}),
            observed_holidays: Default::default(),
        }
    }
}
