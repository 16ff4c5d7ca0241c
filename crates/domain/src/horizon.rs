use crate::{
    alarm::{AlarmRule, AlarmSound},
    date::{Day, TimeOfDay},
    day_override::OverrideStore,
    holiday::{HolidayKind, HolidayPolicy, HolidaySet},
    resolver::{Occurrence, OccurrenceResolver, OccurrenceSource},
    shared::entity::ID,
};
use chrono::{DateTime, Duration, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const MIN_HORIZON_DAYS: u32 = 30;
pub const MAX_HORIZON_DAYS: u32 = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSettings {
    /// Number of calendar days, starting today, to compute events for
    pub horizon_days: u32,
    pub timezone: Tz,
    pub snooze_count: u32,
    pub snooze_interval_minutes: u32,
    pub holiday_eve_time: TimeOfDay,
    pub holiday_policy: HolidayPolicy,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            horizon_days: MIN_HORIZON_DAYS,
            timezone: chrono_tz::Asia::Tokyo,
            snooze_count: 3,
            snooze_interval_minutes: 5,
            holiday_eve_time: TimeOfDay::hm(21, 0),
            holiday_policy: HolidayPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundVariant {
    Default,
    Critical,
    Gentle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventKind {
    Primary {
        source: OccurrenceSource,
    },
    #[serde(rename_all = "camelCase")]
    Snooze {
        index: u32,
        offset_minutes: u32,
    },
    #[serde(rename_all = "camelCase")]
    HolidayEve {
        holiday: Day,
        holiday_kind: HolidayKind,
        name: Option<String>,
    },
}

/// What the delivery collaborator receives for one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequest {
    pub id: String,
    /// Unix timestamp in millis
    pub fire_at: i64,
    pub title: String,
    pub body: String,
    pub sound: SoundVariant,
    /// The user's sound choice, absent for holiday advisories
    #[serde(default)]
    pub alarm_sound: Option<AlarmSound>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEvent {
    /// Derived from the inputs only, stable across regenerations
    pub id: String,
    pub fire_at: i64,
    pub day: Day,
    pub local_time: TimeOfDay,
    pub alarm_id: Option<ID>,
    pub kind: EventKind,
    pub title: String,
    pub body: String,
    pub sound: SoundVariant,
    pub alarm_sound: Option<AlarmSound>,
}

impl ScheduledEvent {
    pub fn delivery_request(&self) -> DeliveryRequest {
        DeliveryRequest {
            id: self.id.clone(),
            fire_at: self.fire_at,
            title: self.title.clone(),
            body: self.body.clone(),
            sound: self.sound,
            alarm_sound: self.alarm_sound,
        }
    }
}

pub fn primary_event_id(alarm_id: &ID, day: Day) -> String {
    format!("alarm:{}:{}:primary", alarm_id, day)
}

pub fn snooze_event_id(alarm_id: &ID, day: Day, index: u32) -> String {
    format!("alarm:{}:{}:snooze:{}", alarm_id, day, index)
}

pub fn holiday_eve_event_id(holiday: Day) -> String {
    format!("holiday-eve:{}", holiday)
}

/// Expands rules over a rolling window of days into concrete fire events
#[derive(Debug, Clone, Default)]
pub struct HorizonScheduler {
    settings: ScheduleSettings,
}

impl HorizonScheduler {
    pub fn new(settings: ScheduleSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ScheduleSettings {
        &self.settings
    }

    /// The horizon days starting at the local calendar day of `now`
    pub fn horizon(&self, now_millis: i64) -> Vec<Day> {
        let today = match Day::from_timestamp_millis(now_millis, &self.settings.timezone) {
            Some(day) => day,
            None => return Vec::new(),
        };
        (0..self.settings.horizon_days)
            .map(|offset| today.add_days(offset as i64))
            .collect()
    }

    /// Every event strictly after `now_millis`, ordered by (instant, id).
    /// Pure: the same inputs always give the same list.
    pub fn plan(
        &self,
        rules: &[AlarmRule],
        overrides: &OverrideStore,
        holidays: &HolidaySet,
        now_millis: i64,
    ) -> Vec<ScheduledEvent> {
        let days = self.horizon(now_millis);
        let resolver = OccurrenceResolver::new(overrides, holidays, self.settings.holiday_policy);

        let mut events = Vec::new();
        // Base-disabled rules are visited too, an enabled override may still turn them on
        for rule in rules {
            for day in &days {
                if let Some(occurrence) = resolver.resolve(rule, *day) {
                    events.extend(self.alarm_events(rule, &occurrence));
                }
            }
        }
        if self.wants_holiday_advisories(rules) {
            events.extend(self.holiday_eve_events(&days, holidays));
        }

        events.retain(|e| e.fire_at > now_millis);
        events.sort_by(|a, b| (a.fire_at, &a.id).cmp(&(b.fire_at, &b.id)));
        events
    }

    fn wants_holiday_advisories(&self, rules: &[AlarmRule]) -> bool {
        rules
            .iter()
            .any(|r| r.enabled && self.settings.holiday_policy.skips_holidays(r))
    }

    fn alarm_events(&self, rule: &AlarmRule, occurrence: &Occurrence) -> Vec<ScheduledEvent> {
        let tz = &self.settings.timezone;
        let primary = occurrence.day.local_instant(occurrence.time, tz);
        let sound = if rule.snooze_enabled {
            SoundVariant::Critical
        } else {
            SoundVariant::Default
        };
        let title = rule.display_name();

        let mut events = vec![ScheduledEvent {
            id: primary_event_id(&rule.id, occurrence.day),
            fire_at: primary.timestamp_millis(),
            day: occurrence.day,
            local_time: local_time_of(&primary),
            alarm_id: Some(rule.id.clone()),
            kind: EventKind::Primary {
                source: occurrence.source,
            },
            title: title.clone(),
            body: primary_body(rule, occurrence),
            sound,
            alarm_sound: Some(rule.sound),
        }];

        if rule.snooze_enabled {
            for index in 1..=self.settings.snooze_count {
                let offset_minutes = index * self.settings.snooze_interval_minutes;
                let instant = primary + Duration::minutes(offset_minutes as i64);
                events.push(ScheduledEvent {
                    id: snooze_event_id(&rule.id, occurrence.day, index),
                    fire_at: instant.timestamp_millis(),
                    day: occurrence.day,
                    local_time: local_time_of(&instant),
                    alarm_id: Some(rule.id.clone()),
                    kind: EventKind::Snooze {
                        index,
                        offset_minutes,
                    },
                    title: title.clone(),
                    body: format!("Snooze {} of {}", index, self.settings.snooze_count),
                    sound,
                    alarm_sound: Some(rule.sound),
                });
            }
        }
        events
    }

    fn holiday_eve_events(&self, days: &[Day], holidays: &HolidaySet) -> Vec<ScheduledEvent> {
        let eve_time = self.settings.holiday_eve_time;
        days.iter()
            .filter_map(|day| holidays.kind(*day).map(|kind| (*day, kind)))
            .map(|(holiday, holiday_kind)| {
                let eve = holiday.pred();
                let instant = eve.local_instant(eve_time, &self.settings.timezone);
                let name = holidays.national_holiday(holiday).map(|h| h.to_string());
                let body = match &name {
                    Some(name) => format!("{} is {}, weekday alarms will not ring", holiday, name),
                    None => format!(
                        "{} is one of your days off, weekday alarms will not ring",
                        holiday
                    ),
                };
                ScheduledEvent {
                    id: holiday_eve_event_id(holiday),
                    fire_at: instant.timestamp_millis(),
                    day: eve,
                    local_time: local_time_of(&instant),
                    alarm_id: None,
                    kind: EventKind::HolidayEve {
                        holiday,
                        holiday_kind,
                        name,
                    },
                    title: "Tomorrow is a holiday".into(),
                    body,
                    sound: SoundVariant::Gentle,
                    alarm_sound: None,
                }
            })
            .collect()
    }
}

fn local_time_of(instant: &DateTime<Tz>) -> TimeOfDay {
    TimeOfDay::hm(instant.hour(), instant.minute())
}

fn primary_body(rule: &AlarmRule, occurrence: &Occurrence) -> String {
    match occurrence.source {
        OccurrenceSource::Recurrence => {
            format!("{} ({})", occurrence.time, rule.recurrence.description())
        }
        OccurrenceSource::OneOff => format!("{} (one-off)", occurrence.time),
        OccurrenceSource::Override => format!("{} (this day only)", occurrence.time),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        alarm::Recurrence,
        holiday::{HolidayCalculator, NationalHoliday},
        shared::weekday::WeekdaySet,
    };
    use chrono::{TimeZone, Weekday};
    use std::collections::{BTreeMap, BTreeSet};

    fn day(month: u32, d: u32) -> Day {
        Day::new(2026, month, d).unwrap()
    }

    fn tokyo_millis(month: u32, d: u32, hour: u32, minute: u32) -> i64 {
        chrono_tz::Asia::Tokyo
            .with_ymd_and_hms(2026, month, d, hour, minute, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn settings(horizon_days: u32) -> ScheduleSettings {
        ScheduleSettings {
            horizon_days,
            ..Default::default()
        }
    }

    fn seven() -> TimeOfDay {
        TimeOfDay::new(7, 0).unwrap()
    }

    fn primaries(events: &[ScheduledEvent]) -> Vec<Day> {
        events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Primary { .. }))
            .map(|e| e.day)
            .collect()
    }

    #[test]
    fn weekday_rule_skips_weekend_and_holiday_monday() {
        // Friday 2026-07-17, Monday 2026-07-20 is Marine Day
        assert_eq!(day(7, 17).weekday(), Weekday::Fri);
        let rule = AlarmRule::new(seven(), Recurrence::Weekdays);
        let holidays = HolidayCalculator::new().holiday_set(2026..=2026, vec![], vec![]);
        let scheduler = HorizonScheduler::new(settings(7));

        let events = scheduler.plan(
            &[rule],
            &OverrideStore::default(),
            &holidays,
            tokyo_millis(7, 17, 6, 0),
        );
        assert_eq!(
            primaries(&events),
            vec![day(7, 17), day(7, 21), day(7, 22), day(7, 23)]
        );
        // Advisory on Sunday evening before Marine Day
        let eve = events
            .iter()
            .find(|e| e.id == "holiday-eve:2026-07-20")
            .unwrap();
        assert_eq!(eve.fire_at, tokyo_millis(7, 19, 21, 0));
        assert_eq!(eve.sound, SoundVariant::Gentle);
        assert_eq!(
            eve.kind,
            EventKind::HolidayEve {
                holiday: day(7, 20),
                holiday_kind: HolidayKind::National,
                name: Some(NationalHoliday::MarineDay.to_string()),
            }
        );
    }

    #[test]
    fn every_day_rule_fires_on_every_day_of_the_horizon() {
        let rule = AlarmRule::new(seven(), Recurrence::EveryDay);
        let holidays = HolidayCalculator::new().holiday_set(2026..=2027, vec![day(12, 24)], vec![]);
        let scheduler = HorizonScheduler::new(settings(45));

        let events = scheduler.plan(
            &[rule],
            &OverrideStore::default(),
            &holidays,
            tokyo_millis(12, 1, 0, 0),
        );
        assert_eq!(primaries(&events).len(), 45);
        // No weekday-only rule, so no advisories
        assert!(events.iter().all(|e| e.alarm_id.is_some()));
    }

    #[test]
    fn expands_snoozes_after_primary() {
        let mut rule = AlarmRule::new(seven(), Recurrence::EveryDay);
        rule.snooze_enabled = true;
        let scheduler = HorizonScheduler::new(settings(30));

        let events = scheduler.plan(
            &[rule.clone()],
            &OverrideStore::default(),
            &HolidaySet::default(),
            tokyo_millis(10, 18, 6, 0),
        );
        assert_eq!(events.len(), 30 * 4);

        let first_day = events
            .iter()
            .filter(|e| e.day == day(10, 18))
            .collect::<Vec<_>>();
        let times = first_day
            .iter()
            .map(|e| e.local_time.to_string())
            .collect::<Vec<_>>();
        assert_eq!(times, vec!["07:00", "07:05", "07:10", "07:15"]);
        assert_eq!(
            first_day[3].id,
            format!("alarm:{}:2026-10-18:snooze:3", rule.id)
        );
        assert_eq!(
            first_day[3].kind,
            EventKind::Snooze {
                index: 3,
                offset_minutes: 15
            }
        );
        assert!(first_day.iter().all(|e| e.sound == SoundVariant::Critical));
    }

    #[test]
    fn drops_events_that_already_passed() {
        let mut rule = AlarmRule::new(seven(), Recurrence::EveryDay);
        rule.snooze_enabled = true;
        let scheduler = HorizonScheduler::new(settings(30));

        let events = scheduler.plan(
            &[rule],
            &OverrideStore::default(),
            &HolidaySet::default(),
            tokyo_millis(10, 18, 7, 7),
        );
        let today = events
            .iter()
            .filter(|e| e.day == day(10, 18))
            .map(|e| e.local_time.to_string())
            .collect::<Vec<_>>();
        assert_eq!(today, vec!["07:10", "07:15"]);
        assert_eq!(events.len(), 29 * 4 + 2);
    }

    #[test]
    fn regeneration_is_idempotent() {
        let rules = vec![
            AlarmRule::new(seven(), Recurrence::Weekdays),
            AlarmRule::new(TimeOfDay::new(8, 30).unwrap(), Recurrence::EveryDay),
        ];
        let mut overrides = OverrideStore::default();
        overrides.set_time_override(&rules[1].id, day(10, 20), TimeOfDay::new(9, 0).unwrap());
        let holidays = HolidayCalculator::new().holiday_set(2026..=2027, vec![], vec![]);
        let scheduler = HorizonScheduler::new(settings(64));
        let now = tokyo_millis(10, 18, 12, 0);

        let first = scheduler.plan(&rules, &overrides, &holidays, now);
        let second = scheduler.plan(&rules, &overrides, &holidays, now);
        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0].fire_at <= w[1].fire_at));
    }

    #[test]
    fn base_disabled_rule_fires_only_on_enabled_override() {
        let mut rule = AlarmRule::new(seven(), Recurrence::Custom(WeekdaySet::empty()));
        rule.enabled = false;
        let mut overrides = OverrideStore::default();
        overrides.set_enabled_override(&rule.id, day(10, 24), true);
        let scheduler = HorizonScheduler::new(settings(30));

        let events = scheduler.plan(
            &[rule],
            &overrides,
            &HolidaySet::default(),
            tokyo_millis(10, 18, 12, 0),
        );
        assert_eq!(primaries(&events), vec![day(10, 24)]);
        assert_eq!(day(10, 24).weekday(), Weekday::Sat);
    }

    #[test]
    fn advisories_name_custom_holidays_and_skip_past_eves() {
        let rule = AlarmRule::new(seven(), Recurrence::Weekdays);
        let custom = BTreeSet::from([day(10, 18), day(10, 21)]);
        let holidays = HolidaySet::new(BTreeMap::new(), custom);
        let scheduler = HorizonScheduler::new(settings(30));

        let events = scheduler.plan(
            &[rule],
            &OverrideStore::default(),
            &holidays,
            tokyo_millis(10, 18, 12, 0),
        );
        let advisories = events
            .iter()
            .filter(|e| e.alarm_id.is_none())
            .collect::<Vec<_>>();
        // The eve of today already passed
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].id, "holiday-eve:2026-10-21");
        assert_eq!(advisories[0].day, day(10, 20));
        assert!(matches!(
            advisories[0].kind,
            EventKind::HolidayEve {
                holiday_kind: HolidayKind::Custom,
                name: None,
                ..
            }
        ));
    }

    #[test]
    fn no_advisories_without_holiday_aware_rules() {
        let mut rule = AlarmRule::new(seven(), Recurrence::Weekdays);
        rule.enabled = false;
        let holidays = HolidaySet::new(BTreeMap::new(), BTreeSet::from([day(10, 21)]));
        let scheduler = HorizonScheduler::new(settings(30));
        let events = scheduler.plan(
            &[rule],
            &OverrideStore::default(),
            &holidays,
            tokyo_millis(10, 18, 12, 0),
        );
        assert!(events.is_empty());
    }

    #[test]
    fn delivery_request_carries_event_identity() {
        let rule = AlarmRule::new(seven(), Recurrence::EveryDay);
        let scheduler = HorizonScheduler::new(settings(30));
        let events = scheduler.plan(
            &[rule.clone()],
            &OverrideStore::default(),
            &HolidaySet::default(),
            tokyo_millis(10, 18, 12, 0),
        );
        let request = events[0].delivery_request();
        assert_eq!(request.id, primary_event_id(&rule.id, day(10, 19)));
        assert_eq!(request.fire_at, tokyo_millis(10, 19, 7, 0));
        assert_eq!(request.title, "Alarm");
        assert_eq!(request.body, "07:00 (Every day)");
        assert_eq!(request.sound, SoundVariant::Default);
        assert_eq!(request.alarm_sound, Some(AlarmSound::Standard));
    }

    #[test]
    fn holiday_aware_rule_skips_holidays_and_keeps_advisories() {
        // Monday 2026-11-23 is Labour Thanksgiving Day
        let mut rule = AlarmRule::new(seven(), Recurrence::EveryDay);
        rule.holiday_aware = Some(true);
        rule.sound = AlarmSound::Birdsong;
        let holidays = HolidayCalculator::new().holiday_set(2026..=2026, vec![], vec![]);
        let scheduler = HorizonScheduler::new(settings(7));

        let events = scheduler.plan(
            &[rule.clone()],
            &OverrideStore::default(),
            &holidays,
            tokyo_millis(11, 21, 0, 0),
        );
        assert_eq!(
            primaries(&events),
            vec![day(11, 21), day(11, 22), day(11, 24), day(11, 25), day(11, 26), day(11, 27)]
        );
        assert!(events.iter().any(|e| e.id == "holiday-eve:2026-11-23"));
        assert!(events
            .iter()
            .filter(|e| e.alarm_id.is_some())
            .all(|e| e.delivery_request().alarm_sound == Some(AlarmSound::Birdsong)));

        // And a weekday rule can opt out of skipping
        let mut rule = AlarmRule::new(seven(), Recurrence::Weekdays);
        rule.holiday_aware = Some(false);
        let events = scheduler.plan(
            &[rule],
            &OverrideStore::default(),
            &holidays,
            tokyo_millis(11, 21, 0, 0),
        );
        assert!(primaries(&events).contains(&day(11, 23)));
        assert!(events.iter().all(|e| e.alarm_id.is_some()));
    }

    #[test]
    fn horizon_starts_at_local_today() {
        let scheduler = HorizonScheduler::new(settings(30));
        // 2026-10-18T23:30 in Tokyo is still 2026-10-18 there but 14:30 UTC
        let days = scheduler.horizon(tokyo_millis(10, 18, 23, 30));
        assert_eq!(days.len(), 30);
        assert_eq!(days[0], day(10, 18));
        assert_eq!(days[29], day(11, 16));
    }
}
