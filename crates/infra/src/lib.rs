mod config;
mod repos;
mod schedule_state;
mod services;
mod system;

pub use config::Config;
pub use repos::{IAlarmRepo, ICustomHolidayRepo, IDayOverrideRepo, IKVRepo, Repos};
pub use schedule_state::{LiveBatch, ScheduleState};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::info;

#[derive(Clone)]
pub struct SchedulerContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub services: Services,
    pub readiness: Arc<Readiness>,
    pub schedule: Arc<ScheduleState>,
}

impl SchedulerContext {
    fn create(config: Config) -> Self {
        let repos = match &config.state_dir {
            Some(dir) => Repos::create_file(dir),
            None => Repos::create_inmemory(),
        };

        let delivery: Arc<dyn IDelivery> = match &config.delivery_webhook_url {
            Some(url) => {
                info!("Deliveries are sent to: {}", url);
                Arc::new(WebhookDelivery::new(url.clone()))
            }
            None => {
                info!("Did not find DELIVERY_WEBHOOK_URL environment variable. Deliveries are kept in memory.");
                Arc::new(InMemoryDelivery::new())
            }
        };
        let holiday_feed: Arc<dyn IHolidayFeed> = match &config.holiday_feed_url {
            Some(url) => Arc::new(IcsHolidayFeed::new(url.clone())),
            None => Arc::new(NoHolidayFeed {}),
        };

        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            services: Services {
                delivery,
                holiday_feed,
                observed_holidays: Default::default(),
            },
            readiness: Arc::new(Readiness::new()),
            schedule: Arc::new(ScheduleState::new()),
        }
    }

    /// In memory context with deliveries already permitted and no holiday feed
    pub fn create_inmemory() -> Self {
        let readiness = Readiness::new();
        readiness.set_delivery_permission(Phase::Ready);
        readiness.set_holiday_feed(Phase::Unavailable);
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            services: Services::create_inmemory(),
            readiness: Arc::new(readiness),
            schedule: Arc::new(ScheduleState::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> SchedulerContext {
    SchedulerContext::create(Config::new())
}
