mod ics;

pub use ics::{parse_ics_dates, IcsHolidayFeed};
use std::{collections::BTreeSet, sync::RwLock};
use wakeup_scheduler_domain::Day;

/// Optional external source of observed holidays.
///
/// `None` means the feed is unavailable or access was denied, callers
/// then continue with the computed holidays only.
#[async_trait::async_trait]
pub trait IHolidayFeed: Send + Sync {
    async fn holidays_between(&self, start: Day, end: Day) -> Option<Vec<Day>>;

    /// An unconfigured feed is never retried
    fn is_configured(&self) -> bool {
        true
    }
}

pub struct NoHolidayFeed {}

#[async_trait::async_trait]
impl IHolidayFeed for NoHolidayFeed {
    async fn holidays_between(&self, _start: Day, _end: Day) -> Option<Vec<Day>> {
        None
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// A fixed list of holidays
pub struct StaticHolidayFeed {
    days: Vec<Day>,
}

impl StaticHolidayFeed {
    pub fn new(days: Vec<Day>) -> Self {
        Self { days }
    }
}

#[async_trait::async_trait]
impl IHolidayFeed for StaticHolidayFeed {
    async fn holidays_between(&self, start: Day, end: Day) -> Option<Vec<Day>> {
        Some(
            self.days
                .iter()
                .filter(|d| **d >= start && **d <= end)
                .copied()
                .collect(),
        )
    }
}

#[derive(Default)]
struct Observed {
    days: BTreeSet<Day>,
    loaded_year: Option<i32>,
}

/// Last holidays loaded from the feed, shared with every schedule pass
#[derive(Default)]
pub struct ObservedHolidays {
    inner: RwLock<Observed>,
}

impl ObservedHolidays {
    /// Replaces the days with a load that starts at `year`
    pub fn replace(&self, year: i32, days: impl IntoIterator<Item = Day>) {
        let mut current = self.inner.write().unwrap_or_else(|e| e.into_inner());
        current.days = days.into_iter().collect();
        current.loaded_year = Some(year);
    }

    pub fn snapshot(&self) -> BTreeSet<Day> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .days
            .clone()
    }

    /// The year the last successful load started at
    pub fn loaded_year(&self) -> Option<i32> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .loaded_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(month: u32, d: u32) -> Day {
        Day::new(2026, month, d).unwrap()
    }

    #[tokio::test]
    async fn static_feed_filters_by_range() {
        let feed = StaticHolidayFeed::new(vec![day(1, 1), day(5, 5), day(12, 31)]);
        assert_eq!(
            feed.holidays_between(day(1, 2), day(12, 31)).await,
            Some(vec![day(5, 5), day(12, 31)])
        );
        assert_eq!(NoHolidayFeed {}.holidays_between(day(1, 1), day(2, 1)).await, None);
    }

    #[test]
    fn observed_holidays_are_replaced_wholesale() {
        let observed = ObservedHolidays::default();
        assert_eq!(observed.loaded_year(), None);
        observed.replace(2026, vec![day(1, 1), day(1, 2)]);
        observed.replace(2027, vec![day(3, 3)]);
        assert_eq!(observed.snapshot().into_iter().collect::<Vec<_>>(), vec![day(3, 3)]);
        assert_eq!(observed.loaded_year(), Some(2027));
    }

    #[test]
    fn survives_a_poisoned_lock() {
        let observed = std::sync::Arc::new(ObservedHolidays::default());
        observed.replace(2026, vec![day(5, 5)]);
        let poisoner = observed.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert_eq!(observed.snapshot().len(), 1);
        observed.replace(2026, vec![]);
        assert!(observed.snapshot().is_empty());
    }
}
