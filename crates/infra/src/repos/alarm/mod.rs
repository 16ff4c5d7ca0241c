mod kv;

pub use kv::KVAlarmRepo;
use wakeup_scheduler_domain::{AlarmRule, ID};

#[async_trait::async_trait]
pub trait IAlarmRepo: Send + Sync {
    async fn insert(&self, alarm: &AlarmRule) -> anyhow::Result<()>;
    async fn save(&self, alarm: &AlarmRule) -> anyhow::Result<()>;
    async fn delete(&self, alarm_id: &ID) -> anyhow::Result<Option<AlarmRule>>;
    async fn find(&self, alarm_id: &ID) -> Option<AlarmRule>;
    /// All alarms in insertion order
    async fn find_all(&self) -> Vec<AlarmRule>;
}
