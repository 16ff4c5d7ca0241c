use crate::{
    dtos::{DayAlarmDTO, DayOverrideDTO, HolidayDTO},
    shared::nullable,
};
use serde::{Deserialize, Serialize};
use wakeup_scheduler_domain::{Day, DayAlarm, DayOverride, TimeOfDay, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOverrideResponse {
    pub day_override: DayOverrideDTO,
}

impl DayOverrideResponse {
    pub fn new(day_override: DayOverride) -> Self {
        Self {
            day_override: DayOverrideDTO::new(day_override),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AlarmDayPathParams {
    pub alarm_id: ID,
    pub day: Day,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DayPathParams {
    pub day: Day,
}

pub mod set_day_override {
    use super::*;

    /// Changes what differs on this day. A field left out keeps its
    /// current value, an explicit `null` clears it.
    #[derive(Debug, Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(
            default,
            deserialize_with = "nullable",
            skip_serializing_if = "Option::is_none"
        )]
        pub enabled: Option<Option<bool>>,
        #[serde(
            default,
            deserialize_with = "nullable",
            skip_serializing_if = "Option::is_none"
        )]
        pub time: Option<Option<TimeOfDay>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub one_off: Option<bool>,
    }

    pub type PathParams = AlarmDayPathParams;

    pub type APIResponse = DayOverrideResponse;
}

pub mod delete_day_override {
    use super::*;

    pub type PathParams = AlarmDayPathParams;

    pub type APIResponse = DayOverrideResponse;
}

pub mod set_day_enabled {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub enabled: bool,
    }

    pub type PathParams = DayPathParams;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub day_overrides: Vec<DayOverrideDTO>,
    }

    impl APIResponse {
        pub fn new(day_overrides: Vec<DayOverride>) -> Self {
            Self {
                day_overrides: day_overrides.into_iter().map(DayOverrideDTO::new).collect(),
            }
        }
    }
}

pub mod get_day_alarms {
    use super::*;

    pub type PathParams = DayPathParams;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub day: Day,
        pub holiday: Option<HolidayDTO>,
        pub alarms: Vec<DayAlarmDTO>,
    }

    impl APIResponse {
        pub fn new(day: Day, holiday: Option<HolidayDTO>, alarms: Vec<DayAlarm>) -> Self {
            Self {
                day,
                holiday,
                alarms: alarms.into_iter().map(DayAlarmDTO::new).collect(),
            }
        }
    }
}
