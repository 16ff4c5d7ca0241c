use crate::{
    date::TimeOfDay,
    shared::{
        entity::{Entity, ID},
        weekday::WeekdaySet,
    },
};
use serde::{Deserialize, Serialize};

/// Which weekdays an `AlarmRule` is active on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recurrence {
    /// Only fires on explicit one-off days
    NoRepeat,
    EveryDay,
    /// Monday to Friday, skipping holidays
    Weekdays,
    Custom(WeekdaySet),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecurrenceKind {
    None,
    EveryDay,
    Weekdays,
    Custom,
}

impl Recurrence {
    pub fn from_parts(kind: RecurrenceKind, weekdays: WeekdaySet) -> Self {
        match kind {
            RecurrenceKind::None => Self::NoRepeat,
            RecurrenceKind::EveryDay => Self::EveryDay,
            RecurrenceKind::Weekdays => Self::Weekdays,
            RecurrenceKind::Custom => Self::Custom(weekdays),
        }
    }

    pub fn kind(&self) -> RecurrenceKind {
        match self {
            Self::NoRepeat => RecurrenceKind::None,
            Self::EveryDay => RecurrenceKind::EveryDay,
            Self::Weekdays => RecurrenceKind::Weekdays,
            Self::Custom(_) => RecurrenceKind::Custom,
        }
    }

    pub fn active_weekdays(&self) -> WeekdaySet {
        match self {
            Self::NoRepeat => WeekdaySet::empty(),
            Self::EveryDay => WeekdaySet::every_day(),
            Self::Weekdays => WeekdaySet::weekdays(),
            Self::Custom(weekdays) => *weekdays,
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::NoRepeat)
    }

    pub fn is_weekdays_only(&self) -> bool {
        matches!(self, Self::Weekdays)
    }

    pub fn description(&self) -> String {
        match self {
            Self::NoRepeat => "No repeat".into(),
            Self::EveryDay => "Every day".into(),
            Self::Weekdays => "Weekdays".into(),
            Self::Custom(weekdays) => {
                if weekdays.is_empty() {
                    "Never".into()
                } else if *weekdays == WeekdaySet::every_day() {
                    "Every day".into()
                } else if *weekdays == WeekdaySet::weekdays() {
                    "Mon-Fri".into()
                } else if *weekdays == WeekdaySet::weekend() {
                    "Weekends".into()
                } else {
                    weekdays
                        .iter()
                        .map(|wday| format!("{:?}", wday))
                        .collect::<Vec<_>>()
                        .join(" ")
                }
            }
        }
    }
}

/// The sound a user picked for an alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlarmSound {
    #[default]
    Standard,
    Beep,
    Bell,
    Birdsong,
}

impl AlarmSound {
    pub const ALL: [AlarmSound; 4] = [Self::Standard, Self::Beep, Self::Bell, Self::Birdsong];
}

/// A user defined alarm. Per-day exceptions never mutate the rule,
/// they live in the `OverrideStore`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmRule {
    pub id: ID,
    pub time: TimeOfDay,
    pub recurrence: Recurrence,
    /// Base state, per-day overrides take precedence
    pub enabled: bool,
    pub snooze_enabled: bool,
    pub label: Option<String>,
    /// Whether the rule skips holidays. `None` leaves it to the `HolidayPolicy`.
    pub holiday_aware: Option<bool>,
    pub sound: AlarmSound,
}

impl AlarmRule {
    pub fn new(time: TimeOfDay, recurrence: Recurrence) -> Self {
        Self {
            id: Default::default(),
            time,
            recurrence,
            enabled: true,
            snooze_enabled: false,
            label: None,
            holiday_aware: None,
            sound: AlarmSound::default(),
        }
    }

    /// Alarms are listed by time of day
    pub fn sort_key(&self) -> u32 {
        self.time.total_minutes()
    }

    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) if !label.trim().is_empty() => label.clone(),
            _ if self.recurrence.is_weekdays_only() => "Weekday alarm".into(),
            _ => "Alarm".into(),
        }
    }
}

impl Entity for AlarmRule {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn active_weekdays_per_recurrence() {
        assert!(Recurrence::NoRepeat.active_weekdays().is_empty());
        assert_eq!(Recurrence::EveryDay.active_weekdays().len(), 7);
        assert_eq!(
            Recurrence::Weekdays.active_weekdays(),
            WeekdaySet::weekdays()
        );
        let custom = WeekdaySet::from_numbers(&[1]).unwrap();
        assert_eq!(Recurrence::Custom(custom).active_weekdays(), custom);
    }

    #[test]
    fn rebuilds_recurrence_from_persisted_parts() {
        let set = WeekdaySet::from_numbers(&[2, 4]).unwrap();
        for recurrence in vec![
            Recurrence::NoRepeat,
            Recurrence::EveryDay,
            Recurrence::Weekdays,
            Recurrence::Custom(set),
            Recurrence::Custom(WeekdaySet::empty()),
        ] {
            let rebuilt = Recurrence::from_parts(recurrence.kind(), recurrence.active_weekdays());
            assert_eq!(rebuilt, recurrence);
        }
    }

    #[test]
    fn describes_recurrence() {
        assert_eq!(Recurrence::Weekdays.description(), "Weekdays");
        assert_eq!(
            Recurrence::Custom(WeekdaySet::weekend()).description(),
            "Weekends"
        );
        assert_eq!(
            Recurrence::Custom(WeekdaySet::from_numbers(&[2, 4]).unwrap()).description(),
            "Mon Wed"
        );
        assert_eq!(
            Recurrence::Custom(WeekdaySet::empty()).description(),
            "Never"
        );
    }

    #[test]
    fn names_alarm_by_label_or_recurrence() {
        let mut rule = AlarmRule::new(TimeOfDay::new(7, 0).unwrap(), Recurrence::Weekdays);
        assert_eq!(rule.display_name(), "Weekday alarm");
        rule.label = Some("Gym".into());
        assert_eq!(rule.display_name(), "Gym");
        assert_eq!(rule.sort_key(), 420);
    }
}
