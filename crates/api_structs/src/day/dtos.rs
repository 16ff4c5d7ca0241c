use crate::dtos::AlarmDTO;
use serde::{Deserialize, Serialize};
use wakeup_scheduler_domain::{Day, DayAlarm, DayOverride, OccurrenceSource, TimeOfDay, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayOverrideDTO {
    pub alarm_id: ID,
    pub day: Day,
    pub enabled: Option<bool>,
    pub time: Option<TimeOfDay>,
    pub one_off: bool,
}

impl DayOverrideDTO {
    pub fn new(o: DayOverride) -> Self {
        Self {
            alarm_id: o.alarm_id,
            day: o.day,
            enabled: o.enabled,
            time: o.time,
            one_off: o.one_off,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DayAlarmDTO {
    pub alarm: AlarmDTO,
    pub fires: bool,
    /// Effective time on this day
    pub time: TimeOfDay,
    pub source: Option<OccurrenceSource>,
    pub has_override: bool,
    pub holiday_suppressed: bool,
}

impl DayAlarmDTO {
    pub fn new(day_alarm: DayAlarm) -> Self {
        Self {
            fires: day_alarm.fires(),
            time: day_alarm.effective_time(),
            source: day_alarm.occurrence.as_ref().map(|o| o.source),
            has_override: day_alarm.has_override,
            holiday_suppressed: day_alarm.holiday_suppressed,
            alarm: AlarmDTO::new(day_alarm.rule),
        }
    }
}
