use serde::{Deserialize, Serialize};
use wakeup_scheduler_domain::{AlarmRule, AlarmSound, Recurrence, RecurrenceKind, WeekdaySet, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceDTO {
    pub kind: RecurrenceKind,
    /// Sunday = 1 ... Saturday = 7, only used by custom recurrences
    #[serde(default)]
    pub weekdays: WeekdaySet,
}

impl RecurrenceDTO {
    pub fn new(recurrence: &Recurrence) -> Self {
        Self {
            kind: recurrence.kind(),
            weekdays: recurrence.active_weekdays(),
        }
    }

    pub fn to_recurrence(&self) -> Recurrence {
        Recurrence::from_parts(self.kind, self.weekdays)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AlarmDTO {
    pub id: ID,
    pub hour: u32,
    pub minute: u32,
    pub recurrence: RecurrenceDTO,
    pub enabled: bool,
    pub snooze_enabled: bool,
    pub label: Option<String>,
    pub holiday_aware: Option<bool>,
    pub sound: AlarmSound,
    pub name: String,
    pub description: String,
}

impl AlarmDTO {
    pub fn new(alarm: AlarmRule) -> Self {
        Self {
            hour: alarm.time.hour(),
            minute: alarm.time.minute(),
            recurrence: RecurrenceDTO::new(&alarm.recurrence),
            enabled: alarm.enabled,
            snooze_enabled: alarm.snooze_enabled,
            name: alarm.display_name(),
            description: alarm.recurrence.description(),
            holiday_aware: alarm.holiday_aware,
            sound: alarm.sound,
            label: alarm.label,
            id: alarm.id,
        }
    }
}
