use super::ICustomHolidayRepo;
use crate::repos::kv::{load_json, or_default_logged, store_json, IKVRepo};
use std::{collections::BTreeSet, sync::Arc};
use tokio::sync::Mutex;
use tracing::warn;
use wakeup_scheduler_domain::Day;

const CUSTOM_HOLIDAYS_KEY: &str = "custom_holidays_v1";

/// Persisted as a sorted list of `[year, month, day]`
type DayTriple = (i32, u32, u32);

pub struct KVCustomHolidayRepo {
    kv: Arc<dyn IKVRepo>,
    lock: Mutex<()>,
}

impl KVCustomHolidayRepo {
    pub fn new(kv: Arc<dyn IKVRepo>) -> Self {
        Self {
            kv,
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> anyhow::Result<BTreeSet<Day>> {
        let triples: Vec<DayTriple> = load_json(self.kv.as_ref(), CUSTOM_HOLIDAYS_KEY).await?;
        let days: BTreeSet<Day> = triples
            .into_iter()
            .filter_map(|(year, month, day)| {
                let res = Day::new(year, month, day);
                if res.is_none() {
                    warn!("Skipping invalid custom holiday: {}-{}-{}", year, month, day);
                }
                res
            })
            .collect();
        Ok(days)
    }

    async fn store(&self, days: &BTreeSet<Day>) -> anyhow::Result<()> {
        let triples = days
            .iter()
            .map(|d| (d.year(), d.month(), d.day()))
            .collect::<Vec<DayTriple>>();
        store_json(self.kv.as_ref(), CUSTOM_HOLIDAYS_KEY, &triples).await
    }
}

#[async_trait::async_trait]
impl ICustomHolidayRepo for KVCustomHolidayRepo {
    async fn insert(&self, day: Day) -> anyhow::Result<bool> {
        let _guard = self.lock.lock().await;
        let mut days = self.load().await?;
        if !days.insert(day) {
            return Ok(false);
        }
        self.store(&days).await?;
        Ok(true)
    }

    async fn delete(&self, day: Day) -> anyhow::Result<bool> {
        let _guard = self.lock.lock().await;
        let mut days = self.load().await?;
        if !days.remove(&day) {
            return Ok(false);
        }
        self.store(&days).await?;
        Ok(true)
    }

    async fn find_all(&self) -> BTreeSet<Day> {
        or_default_logged(self.load().await, CUSTOM_HOLIDAYS_KEY)
    }
}
