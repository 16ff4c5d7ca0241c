mod kv;

pub use kv::KVDayOverrideRepo;
use wakeup_scheduler_domain::{Day, DayOverride, DayOverrideChange, ID};

/// Every mutation is a read-modify-write under one lock, so concurrent
/// changes to different override kinds of the same day never undo each other.
#[async_trait::async_trait]
pub trait IDayOverrideRepo: Send + Sync {
    /// Replaces the whole override, an empty override is removed instead
    async fn save(&self, day_override: &DayOverride) -> anyhow::Result<()>;
    /// Updates only the parts of the override that `change` sets
    async fn apply_change(
        &self,
        alarm_id: &ID,
        day: Day,
        change: &DayOverrideChange,
    ) -> anyhow::Result<DayOverride>;
    /// Sets the enabled override of every given alarm on `day`, keeping
    /// their time overrides
    async fn set_all_enabled(
        &self,
        alarm_ids: &[ID],
        day: Day,
        enabled: bool,
    ) -> anyhow::Result<Vec<DayOverride>>;
    async fn delete(&self, alarm_id: &ID, day: Day) -> anyhow::Result<Option<DayOverride>>;
    async fn delete_by_alarm(&self, alarm_id: &ID) -> anyhow::Result<usize>;
    /// Removes every override dated before `day`
    async fn delete_before(&self, day: Day) -> anyhow::Result<usize>;
    async fn find(&self, alarm_id: &ID, day: Day) -> Option<DayOverride>;
    async fn find_all(&self) -> Vec<DayOverride>;
}

#[cfg(test)]
mod tests {
    use crate::{
        repos::{kv::FlakyKVRepo, Repos},
        SchedulerContext,
    };
    use std::sync::Arc;
    use wakeup_scheduler_domain::{Day, DayOverride, DayOverrideChange, TimeOfDay, ID};

    fn day(d: u32) -> Day {
        Day::new(2026, 10, d).unwrap()
    }

    #[tokio::test]
    async fn upserts_and_removes_empty_overrides() {
        let ctx = SchedulerContext::create_inmemory();
        let alarm_id = ID::new();
        let mut o = DayOverride::new(&alarm_id, day(20));
        o.enabled = Some(false);
        ctx.repos.day_overrides.save(&o).await.unwrap();

        o.time = TimeOfDay::new(8, 15).ok();
        ctx.repos.day_overrides.save(&o).await.unwrap();
        assert_eq!(ctx.repos.day_overrides.find_all().await, vec![o.clone()]);

        o.enabled = None;
        o.time = None;
        ctx.repos.day_overrides.save(&o).await.unwrap();
        assert!(ctx.repos.day_overrides.find(&alarm_id, day(20)).await.is_none());
        assert!(ctx.repos.day_overrides.find_all().await.is_empty());
    }

    #[tokio::test]
    async fn deletes_by_alarm_and_date() {
        let ctx = SchedulerContext::create_inmemory();
        let alarm_id = ID::new();
        let other_id = ID::new();
        let overrides = [(&alarm_id, 1), (&alarm_id, 25), (&other_id, 2), (&other_id, 26)]
            .into_iter()
            .map(|(id, d)| {
                let mut o = DayOverride::new(id, day(d));
                o.one_off = true;
                o
            })
            .collect::<Vec<_>>();
        for o in &overrides {
            ctx.repos.day_overrides.save(o).await.unwrap();
        }

        assert_eq!(ctx.repos.day_overrides.delete_before(day(10)).await.unwrap(), 2);
        assert_eq!(ctx.repos.day_overrides.delete_by_alarm(&alarm_id).await.unwrap(), 1);
        let deleted = ctx.repos.day_overrides.delete(&other_id, day(26)).await.unwrap();
        assert_eq!(deleted, Some(overrides[3].clone()));
        assert!(ctx.repos.day_overrides.find_all().await.is_empty());
    }

    #[tokio::test]
    async fn enabled_change_keeps_time_override() {
        let ctx = SchedulerContext::create_inmemory();
        let alarm_id = ID::new();
        let nine = TimeOfDay::new(9, 0).ok();
        let set_time = DayOverrideChange {
            time: Some(nine),
            ..Default::default()
        };
        ctx.repos
            .day_overrides
            .apply_change(&alarm_id, day(20), &set_time)
            .await
            .unwrap();

        let set_enabled = DayOverrideChange {
            enabled: Some(Some(true)),
            ..Default::default()
        };
        let stored = ctx
            .repos
            .day_overrides
            .apply_change(&alarm_id, day(20), &set_enabled)
            .await
            .unwrap();
        assert_eq!(stored.enabled, Some(true));
        assert_eq!(stored.time, nine);
        assert_eq!(ctx.repos.day_overrides.find(&alarm_id, day(20)).await, Some(stored));
    }

    #[tokio::test]
    async fn bulk_enable_keeps_time_overrides() {
        let ctx = SchedulerContext::create_inmemory();
        let first = ID::new();
        let second = ID::new();
        let mut moved = DayOverride::new(&first, day(21));
        moved.time = TimeOfDay::new(9, 30).ok();
        ctx.repos.day_overrides.save(&moved).await.unwrap();

        let updated = ctx
            .repos
            .day_overrides
            .set_all_enabled(&[first.clone(), second.clone()], day(21), false)
            .await
            .unwrap();
        assert_eq!(updated.len(), 2);
        let stored = ctx.repos.day_overrides.find(&first, day(21)).await.unwrap();
        assert_eq!(stored.enabled, Some(false));
        assert_eq!(stored.time, moved.time);
        assert_eq!(
            ctx.repos.day_overrides.find(&second, day(21)).await.unwrap().enabled,
            Some(false)
        );
    }

    #[tokio::test]
    async fn failed_reads_do_not_overwrite_overrides() {
        let kv = Arc::new(FlakyKVRepo::new());
        let repos = Repos::with_kv(kv.clone());
        let alarm_id = ID::new();
        let mut o = DayOverride::new(&alarm_id, day(22));
        o.enabled = Some(false);
        repos.day_overrides.save(&o).await.unwrap();

        kv.fail_reads(true);
        let mut other = DayOverride::new(&alarm_id, day(23));
        other.one_off = true;
        assert!(repos.day_overrides.save(&other).await.is_err());
        assert!(repos.day_overrides.find_all().await.is_empty());

        kv.fail_reads(false);
        assert_eq!(repos.day_overrides.find_all().await, vec![o]);
    }
}
