use crate::{
    date::{Day, TimeOfDay},
    shared::entity::ID,
};
use std::collections::BTreeMap;

/// Everything that is different about one alarm on one day.
///
/// A "this day only off" exception is `enabled = Some(false)`, a one-off
/// day is `one_off = true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOverride {
    pub alarm_id: ID,
    pub day: Day,
    pub enabled: Option<bool>,
    pub time: Option<TimeOfDay>,
    pub one_off: bool,
}

impl DayOverride {
    pub fn new(alarm_id: &ID, day: Day) -> Self {
        Self {
            alarm_id: alarm_id.clone(),
            day,
            enabled: None,
            time: None,
            one_off: false,
        }
    }

    /// An empty override carries no information and is not stored
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.time.is_none() && !self.one_off
    }
}

/// A partial update of one override. The enabled and time overrides are
/// independent: `None` keeps the current value, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayOverrideChange {
    pub enabled: Option<Option<bool>>,
    pub time: Option<Option<TimeOfDay>>,
    pub one_off: Option<bool>,
}

/// Per (alarm, day) exceptions layered on top of the alarm rules
#[derive(Debug, Clone, Default)]
pub struct OverrideStore {
    overrides: BTreeMap<(ID, Day), DayOverride>,
}

impl OverrideStore {
    pub fn new(overrides: Vec<DayOverride>) -> Self {
        let mut store = Self::default();
        for o in overrides {
            if !o.is_empty() {
                store.overrides.insert((o.alarm_id.clone(), o.day), o);
            }
        }
        store
    }

    pub fn get(&self, alarm_id: &ID, day: Day) -> Option<&DayOverride> {
        self.overrides.get(&(alarm_id.clone(), day))
    }

    pub fn is_enabled(&self, alarm_id: &ID, day: Day) -> Option<bool> {
        self.get(alarm_id, day).and_then(|o| o.enabled)
    }

    pub fn time_override(&self, alarm_id: &ID, day: Day) -> Option<TimeOfDay> {
        self.get(alarm_id, day).and_then(|o| o.time)
    }

    pub fn is_one_off(&self, alarm_id: &ID, day: Day) -> bool {
        self.get(alarm_id, day).map(|o| o.one_off).unwrap_or(false)
    }

    pub fn one_off_days(&self, alarm_id: &ID) -> Vec<Day> {
        self.overrides_for(alarm_id)
            .filter(|o| o.one_off)
            .map(|o| o.day)
            .collect()
    }

    pub fn overrides_for<'a>(&'a self, alarm_id: &'a ID) -> impl Iterator<Item = &'a DayOverride> {
        self.overrides
            .values()
            .filter(move |o| o.alarm_id == *alarm_id)
    }

    pub fn overrides_on(&self, day: Day) -> impl Iterator<Item = &DayOverride> {
        self.overrides.values().filter(move |o| o.day == day)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayOverride> {
        self.overrides.values()
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Applies `update` to the override of (alarm, day) and returns the result.
    /// When the result is empty it is removed from the store.
    pub fn upsert<F>(&mut self, alarm_id: &ID, day: Day, update: F) -> DayOverride
    where
        F: FnOnce(&mut DayOverride),
    {
        let key = (alarm_id.clone(), day);
        let mut o = self
            .overrides
            .remove(&key)
            .unwrap_or_else(|| DayOverride::new(alarm_id, day));
        update(&mut o);
        if !o.is_empty() {
            self.overrides.insert(key, o.clone());
        }
        o
    }

    pub fn set_enabled_override(&mut self, alarm_id: &ID, day: Day, enabled: bool) -> DayOverride {
        self.upsert(alarm_id, day, |o| o.enabled = Some(enabled))
    }

    pub fn clear_enabled_override(&mut self, alarm_id: &ID, day: Day) -> DayOverride {
        self.upsert(alarm_id, day, |o| o.enabled = None)
    }

    pub fn set_time_override(&mut self, alarm_id: &ID, day: Day, time: TimeOfDay) -> DayOverride {
        self.upsert(alarm_id, day, |o| o.time = Some(time))
    }

    pub fn clear_time_override(&mut self, alarm_id: &ID, day: Day) -> DayOverride {
        self.upsert(alarm_id, day, |o| o.time = None)
    }

    pub fn set_one_off(&mut self, alarm_id: &ID, day: Day, one_off: bool) -> DayOverride {
        self.upsert(alarm_id, day, |o| o.one_off = one_off)
    }

    /// Applies only the parts of `change` that are set, returns the result
    pub fn apply_change(&mut self, alarm_id: &ID, day: Day, change: &DayOverrideChange) -> DayOverride {
        match change.enabled {
            Some(Some(enabled)) => {
                self.set_enabled_override(alarm_id, day, enabled);
            }
            Some(None) => {
                self.clear_enabled_override(alarm_id, day);
            }
            None => (),
        }
        match change.time {
            Some(Some(time)) => {
                self.set_time_override(alarm_id, day, time);
            }
            Some(None) => {
                self.clear_time_override(alarm_id, day);
            }
            None => (),
        }
        if let Some(one_off) = change.one_off {
            self.set_one_off(alarm_id, day, one_off);
        }
        self.get(alarm_id, day)
            .cloned()
            .unwrap_or_else(|| DayOverride::new(alarm_id, day))
    }

    /// Turns every given alarm on or off for a single day
    pub fn set_all_enabled_overrides_for_date<'a, I>(
        &mut self,
        alarm_ids: I,
        day: Day,
        enabled: bool,
    ) -> Vec<DayOverride>
    where
        I: IntoIterator<Item = &'a ID>,
    {
        alarm_ids
            .into_iter()
            .map(|id| self.set_enabled_override(id, day, enabled))
            .collect()
    }

    /// Restores the day to the plain rule
    pub fn clear(&mut self, alarm_id: &ID, day: Day) -> Option<DayOverride> {
        self.overrides.remove(&(alarm_id.clone(), day))
    }

    pub fn remove_alarm(&mut self, alarm_id: &ID) -> Vec<DayOverride> {
        let keys = self
            .overrides_for(alarm_id)
            .map(|o| (o.alarm_id.clone(), o.day))
            .collect::<Vec<_>>();
        keys.iter()
            .filter_map(|key| self.overrides.remove(key))
            .collect()
    }

    /// Drops every override dated before `day`, returns how many were removed
    pub fn prune_before(&mut self, day: Day) -> usize {
        let before = self.overrides.len();
        self.overrides.retain(|(_, d), _| *d >= day);
        before - self.overrides.len()
    }
}
