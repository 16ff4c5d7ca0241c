use serde::{Deserialize, Serialize};
use wakeup_scheduler_domain::{
    AlarmSound, Day, EventKind, ScheduledEvent, SoundVariant, TimeOfDay, ID,
};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEventDTO {
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

impl ScheduledEventDTO {
    pub fn new(event: ScheduledEvent) -> Self {
        Self {
            id: event.id,
            fire_at: event.fire_at,
            day: event.day,
            local_time: event.local_time,
            alarm_id: event.alarm_id,
            kind: event.kind,
            title: event.title,
            body: event.body,
            sound: event.sound,
            alarm_sound: event.alarm_sound,
        }
    }
}
