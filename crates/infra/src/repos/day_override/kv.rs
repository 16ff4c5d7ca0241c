use super::IDayOverrideRepo;
use crate::repos::kv::{load_json, or_default_logged, store_json, IKVRepo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use wakeup_scheduler_domain::{Day, DayOverride, DayOverrideChange, OverrideStore, TimeOfDay, ID};

const DAY_OVERRIDES_KEY: &str = "day_overrides_v1";

pub struct KVDayOverrideRepo {
    kv: Arc<dyn IKVRepo>,
    lock: Mutex<()>,
}

impl KVDayOverrideRepo {
    pub fn new(kv: Arc<dyn IKVRepo>) -> Self {
        Self {
            kv,
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> anyhow::Result<OverrideStore> {
        let records: Vec<DayOverrideRecord> = load_json(self.kv.as_ref(), DAY_OVERRIDES_KEY).await?;
        Ok(OverrideStore::new(
            records.into_iter().map(DayOverride::from).collect(),
        ))
    }

    async fn load_or_default(&self) -> OverrideStore {
        or_default_logged(self.load().await, DAY_OVERRIDES_KEY)
    }

    async fn store(&self, store: &OverrideStore) -> anyhow::Result<()> {
        let records = store.iter().map(DayOverrideRecord::from).collect::<Vec<_>>();
        store_json(self.kv.as_ref(), DAY_OVERRIDES_KEY, &records).await
    }

    /// Loads, mutates and stores the overrides while holding the lock
    async fn update<F, T>(&self, mutate: F) -> anyhow::Result<T>
    where
        F: FnOnce(&mut OverrideStore) -> T + Send,
        T: Send,
    {
        let _guard = self.lock.lock().await;
        let mut store = self.load().await?;
        let res = mutate(&mut store);
        self.store(&store).await?;
        Ok(res)
    }
}

#[async_trait::async_trait]
impl IDayOverrideRepo for KVDayOverrideRepo {
    async fn save(&self, day_override: &DayOverride) -> anyhow::Result<()> {
        self.update(|store| {
            store.upsert(&day_override.alarm_id, day_override.day, |existing| {
                existing.enabled = day_override.enabled;
                existing.time = day_override.time;
                existing.one_off = day_override.one_off;
            });
        })
        .await
    }

    async fn apply_change(
        &self,
        alarm_id: &ID,
        day: Day,
        change: &DayOverrideChange,
    ) -> anyhow::Result<DayOverride> {
        self.update(|store| store.apply_change(alarm_id, day, change))
            .await
    }

    async fn set_all_enabled(
        &self,
        alarm_ids: &[ID],
        day: Day,
        enabled: bool,
    ) -> anyhow::Result<Vec<DayOverride>> {
        self.update(|store| store.set_all_enabled_overrides_for_date(alarm_ids, day, enabled))
            .await
    }

    async fn delete(&self, alarm_id: &ID, day: Day) -> anyhow::Result<Option<DayOverride>> {
        self.update(|store| store.clear(alarm_id, day)).await
    }

    async fn delete_by_alarm(&self, alarm_id: &ID) -> anyhow::Result<usize> {
        self.update(|store| store.remove_alarm(alarm_id).len()).await
    }

    async fn delete_before(&self, day: Day) -> anyhow::Result<usize> {
        self.update(|store| store.prune_before(day)).await
    }

    async fn find(&self, alarm_id: &ID, day: Day) -> Option<DayOverride> {
        self.load_or_default().await.get(alarm_id, day).cloned()
    }

    async fn find_all(&self) -> Vec<DayOverride> {
        self.load_or_default().await.iter().cloned().collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayOverrideRecord {
    alarm_id: ID,
    day: Day,
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(default)]
    time: Option<TimeOfDay>,
    #[serde(default)]
    one_off: bool,
}

impl From<&DayOverride> for DayOverrideRecord {
    fn from(o: &DayOverride) -> Self {
        Self {
            alarm_id: o.alarm_id.clone(),
            day: o.day,
            enabled: o.enabled,
            time: o.time,
            one_off: o.one_off,
        }
    }
}

impl From<DayOverrideRecord> for DayOverride {
    fn from(record: DayOverrideRecord) -> Self {
        Self {
            alarm_id: record.alarm_id,
            day: record.day,
            enabled: record.enabled,
            time: record.time,
            one_off: record.one_off,
        }
    }
}
