mod alarm;
mod date;
mod day_override;
mod holiday;
mod horizon;
mod resolver;
mod shared;

pub use alarm::{AlarmRule, AlarmSound, Recurrence, RecurrenceKind};
pub use date::{is_valid_date, Day, InvalidDayError, InvalidTimeError, TimeOfDay};
pub use day_override::{DayOverride, DayOverrideChange, OverrideStore};
pub use holiday::{
    apply_citizens_holidays, apply_substitute_holidays, equinox_day, HolidayCalculator,
    HolidayKind, HolidayPolicy, HolidaySet, NationalHoliday,
};
pub use horizon::{
    holiday_eve_event_id, primary_event_id, snooze_event_id, DeliveryRequest, EventKind,
    HorizonScheduler, ScheduleSettings, ScheduledEvent, SoundVariant, MAX_HORIZON_DAYS,
    MIN_HORIZON_DAYS,
};
pub use resolver::{day_alarms, DayAlarm, Occurrence, OccurrenceResolver, OccurrenceSource};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::weekday::{weekday_to_number, InvalidWeekdayError, WeekdaySet};
