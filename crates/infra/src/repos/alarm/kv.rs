use super::IAlarmRepo;
use crate::repos::kv::{load_json, or_default_logged, store_json, IKVRepo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use wakeup_scheduler_domain::{
    AlarmRule, AlarmSound, Recurrence, RecurrenceKind, TimeOfDay, WeekdaySet, ID,
};

const ALARMS_KEY: &str = "alarm_rules_v1";

pub struct KVAlarmRepo {
    kv: Arc<dyn IKVRepo>,
    /// Serializes read-modify-write cycles on the alarm list
    lock: Mutex<()>,
}

impl KVAlarmRepo {
    pub fn new(kv: Arc<dyn IKVRepo>) -> Self {
        Self {
            kv,
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> anyhow::Result<Vec<AlarmRule>> {
        let records: Vec<AlarmRecord> = load_json(self.kv.as_ref(), ALARMS_KEY).await?;
        let alarms = records
            .into_iter()
            .map(AlarmRule::try_from)
            .collect::<Result<Vec<_>, _>>();
        match alarms {
            Ok(alarms) => Ok(alarms),
            Err(e) => {
                tracing::error!("Persisted alarm is invalid, alarms are reset. Error: {:?}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn load_or_default(&self) -> Vec<AlarmRule> {
        or_default_logged(self.load().await, ALARMS_KEY)
    }

    async fn store(&self, alarms: &[AlarmRule]) -> anyhow::Result<()> {
        let records = alarms.iter().map(AlarmRecord::from).collect::<Vec<_>>();
        store_json(self.kv.as_ref(), ALARMS_KEY, &records).await
    }
}

#[async_trait::async_trait]
impl IAlarmRepo for KVAlarmRepo {
    async fn insert(&self, alarm: &AlarmRule) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut alarms = self.load().await?;
        alarms.push(alarm.clone());
        self.store(&alarms).await
    }

    async fn save(&self, alarm: &AlarmRule) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut alarms = self.load().await?;
        match alarms.iter_mut().find(|a| a.id == alarm.id) {
            Some(existing) => *existing = alarm.clone(),
            None => anyhow::bail!("Alarm with id: {} was not found", alarm.id),
        }
        self.store(&alarms).await
    }

    async fn delete(&self, alarm_id: &ID) -> anyhow::Result<Option<AlarmRule>> {
        let _guard = self.lock.lock().await;
        let mut alarms = self.load().await?;
        let index = match alarms.iter().position(|a| a.id == *alarm_id) {
            Some(index) => index,
            None => return Ok(None),
        };
        let deleted = alarms.remove(index);
        self.store(&alarms).await?;
        Ok(Some(deleted))
    }

    async fn find(&self, alarm_id: &ID) -> Option<AlarmRule> {
        self.load_or_default()
            .await
            .into_iter()
            .find(|a| a.id == *alarm_id)
    }

    async fn find_all(&self) -> Vec<AlarmRule> {
        self.load_or_default().await
    }
}

/// The persisted shape of an alarm
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlarmRecord {
    id: ID,
    hour: u32,
    minute: u32,
    recurrence_kind: RecurrenceKind,
    weekday_set: WeekdaySet,
    is_enabled: bool,
    snooze_enabled: bool,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    holiday_aware: Option<bool>,
    #[serde(default)]
    sound: AlarmSound,
}

impl From<&AlarmRule> for AlarmRecord {
    fn from(alarm: &AlarmRule) -> Self {
        Self {
            id: alarm.id.clone(),
            hour: alarm.time.hour(),
            minute: alarm.time.minute(),
            recurrence_kind: alarm.recurrence.kind(),
            weekday_set: alarm.recurrence.active_weekdays(),
            is_enabled: alarm.enabled,
            snooze_enabled: alarm.snooze_enabled,
            label: alarm.label.clone(),
            holiday_aware: alarm.holiday_aware,
            sound: alarm.sound,
        }
    }
}

impl TryFrom<AlarmRecord> for AlarmRule {
    type Error = anyhow::Error;

    fn try_from(record: AlarmRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            time: TimeOfDay::new(record.hour, record.minute)?,
            recurrence: Recurrence::from_parts(record.recurrence_kind, record.weekday_set),
            enabled: record.is_enabled,
            snooze_enabled: record.snooze_enabled,
            label: record.label,
            holiday_aware: record.holiday_aware,
            sound: record.sound,
        })
    }
}
