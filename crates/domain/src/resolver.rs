use crate::{
    alarm::AlarmRule,
    date::{Day, TimeOfDay},
    day_override::OverrideStore,
    holiday::{HolidayPolicy, HolidaySet},
    shared::entity::ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OccurrenceSource {
    Recurrence,
    OneOff,
    /// Forced on by a per-day enabled override
    Override,
}

/// A single firing of an alarm on a given day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub alarm_id: ID,
    pub day: Day,
    pub time: TimeOfDay,
    pub source: OccurrenceSource,
}

/// Decides whether an alarm fires on a day, and at what time.
///
/// Precedence, first match wins:
/// 1. an enabled override for the day
/// 2. the disabled base state of the rule
/// 3. a one-off day, which ignores holidays
/// 4. the recurrence, minus holidays when the rule or the policy says so
pub struct OccurrenceResolver<'a> {
    overrides: &'a OverrideStore,
    holidays: &'a HolidaySet,
    policy: HolidayPolicy,
}

impl<'a> OccurrenceResolver<'a> {
    pub fn new(overrides: &'a OverrideStore, holidays: &'a HolidaySet, policy: HolidayPolicy) -> Self {
        Self {
            overrides,
            holidays,
            policy,
        }
    }

    pub fn resolve(&self, rule: &AlarmRule, day: Day) -> Option<Occurrence> {
        let source = self.fires(rule, day)?;
        let time = self
            .overrides
            .time_override(&rule.id, day)
            .unwrap_or(rule.time);
        Some(Occurrence {
            alarm_id: rule.id.clone(),
            day,
            time,
            source,
        })
    }

    /// Whether the day is skipped by the holiday policy for this rule,
    /// ignoring overrides
    pub fn is_holiday_suppressed(&self, rule: &AlarmRule, day: Day) -> bool {
        self.policy.skips_holidays(rule)
            && rule.recurrence.active_weekdays().contains(day.weekday())
            && self.holidays.contains(day)
    }

    fn fires(&self, rule: &AlarmRule, day: Day) -> Option<OccurrenceSource> {
        match self.overrides.is_enabled(&rule.id, day) {
            Some(false) => return None,
            Some(true) => return Some(OccurrenceSource::Override),
            None => (),
        }
        if !rule.enabled {
            return None;
        }
        if self.overrides.is_one_off(&rule.id, day) {
            return Some(OccurrenceSource::OneOff);
        }
        if !rule.recurrence.active_weekdays().contains(day.weekday()) {
            return None;
        }
        if self.policy.skips_holidays(rule) && self.holidays.contains(day) {
            return None;
        }
        Some(OccurrenceSource::Recurrence)
    }
}

/// How an alarm looks on one specific day, as shown in a day view
#[derive(Debug, Clone, PartialEq)]
pub struct DayAlarm {
    pub rule: AlarmRule,
    pub day: Day,
    pub occurrence: Option<Occurrence>,
    pub has_override: bool,
    pub holiday_suppressed: bool,
}

impl DayAlarm {
    pub fn fires(&self) -> bool {
        self.occurrence.is_some()
    }

    pub fn effective_time(&self) -> TimeOfDay {
        self.occurrence
            .as_ref()
            .map(|o| o.time)
            .unwrap_or(self.rule.time)
    }
}

/// Every rule as it resolves on `day`, ordered by effective time
pub fn day_alarms(
    rules: &[AlarmRule],
    overrides: &OverrideStore,
    holidays: &HolidaySet,
    policy: HolidayPolicy,
    day: Day,
) -> Vec<DayAlarm> {
    let resolver = OccurrenceResolver::new(overrides, holidays, policy);
    let mut alarms = rules
        .iter()
        .map(|rule| DayAlarm {
            rule: rule.clone(),
            day,
            occurrence: resolver.resolve(rule, day),
            has_override: overrides.get(&rule.id, day).is_some(),
            holiday_suppressed: resolver.is_holiday_suppressed(rule, day),
        })
        .collect::<Vec<_>>();
    alarms.sort_by_key(|a| (a.effective_time(), a.rule.id.clone()));
    alarms
}
