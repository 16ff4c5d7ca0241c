mod kv;

pub use kv::KVCustomHolidayRepo;
use std::collections::BTreeSet;
use wakeup_scheduler_domain::Day;

/// The user's own days off, kept apart from the computed national holidays
#[async_trait::async_trait]
pub trait ICustomHolidayRepo: Send + Sync {
    /// Returns false when the day already was a custom holiday
    async fn insert(&self, day: Day) -> anyhow::Result<bool>;
    /// Returns false when the day was not a custom holiday
    async fn delete(&self, day: Day) -> anyhow::Result<bool>;
    async fn find_all(&self) -> BTreeSet<Day>;
}
