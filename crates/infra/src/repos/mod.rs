mod alarm;
mod custom_holiday;
mod day_override;
mod kv;

pub use alarm::IAlarmRepo;
use alarm::KVAlarmRepo;
pub use custom_holiday::ICustomHolidayRepo;
use custom_holiday::KVCustomHolidayRepo;
pub use day_override::IDayOverrideRepo;
use day_override::KVDayOverrideRepo;
pub use kv::{FileKVRepo, IKVRepo, InMemoryKVRepo};
use std::{path::Path, sync::Arc};
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub kv: Arc<dyn IKVRepo>,
    pub alarms: Arc<dyn IAlarmRepo>,
    pub day_overrides: Arc<dyn IDayOverrideRepo>,
    pub custom_holidays: Arc<dyn ICustomHolidayRepo>,
}

impl Repos {
    fn with_kv(kv: Arc<dyn IKVRepo>) -> Self {
        Self {
            alarms: Arc::new(KVAlarmRepo::new(kv.clone())),
            day_overrides: Arc::new(KVDayOverrideRepo::new(kv.clone())),
            custom_holidays: Arc::new(KVCustomHolidayRepo::new(kv.clone())),
            kv,
        }
    }

    pub fn create_file(dir: &Path) -> Self {
        info!("Persisting state in: {}", dir.display());
        Self::with_kv(Arc::new(FileKVRepo::new(dir)))
    }

    pub fn create_inmemory() -> Self {
        Self::with_kv(Arc::new(InMemoryKVRepo::new()))
    }
}
