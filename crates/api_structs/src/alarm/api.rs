use crate::{
    dtos::{AlarmDTO, RecurrenceDTO},
    shared::nullable,
};
use serde::{Deserialize, Serialize};
use wakeup_scheduler_domain::{AlarmRule, AlarmSound, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmResponse {
    pub alarm: AlarmDTO,
}

impl AlarmResponse {
    pub fn new(alarm: AlarmRule) -> Self {
        Self {
            alarm: AlarmDTO::new(alarm),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AlarmPathParams {
    pub alarm_id: ID,
}

pub mod create_alarm {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub hour: u32,
        pub minute: u32,
        pub recurrence: RecurrenceDTO,
        #[serde(default)]
        pub enabled: Option<bool>,
        #[serde(default)]
        pub snooze_enabled: Option<bool>,
        #[serde(default)]
        pub label: Option<String>,
        /// Left out, the holiday policy decides
        #[serde(default)]
        pub holiday_aware: Option<bool>,
        #[serde(default)]
        pub sound: Option<AlarmSound>,
    }

    pub type APIResponse = AlarmResponse;
}

pub mod get_alarm {
    use super::*;

    pub type PathParams = AlarmPathParams;

    pub type APIResponse = AlarmResponse;
}

pub mod get_alarms {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub alarms: Vec<AlarmDTO>,
    }

    impl APIResponse {
        pub fn new(alarms: Vec<AlarmRule>) -> Self {
            Self {
                alarms: alarms.into_iter().map(AlarmDTO::new).collect(),
            }
        }
    }
}

pub mod update_alarm {
    use super::*;

    #[derive(Debug, Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub hour: Option<u32>,
        #[serde(default)]
        pub minute: Option<u32>,
        #[serde(default)]
        pub recurrence: Option<RecurrenceDTO>,
        #[serde(default)]
        pub enabled: Option<bool>,
        #[serde(default)]
        pub snooze_enabled: Option<bool>,
        #[serde(default)]
        pub label: Option<String>,
        /// `null` hands the decision back to the holiday policy
        #[serde(
            default,
            deserialize_with = "nullable",
            skip_serializing_if = "Option::is_none"
        )]
        pub holiday_aware: Option<Option<bool>>,
        #[serde(default)]
        pub sound: Option<AlarmSound>,
    }

    pub type PathParams = AlarmPathParams;

    pub type APIResponse = AlarmResponse;
}

pub mod delete_alarm {
    use super::*;

    pub type PathParams = AlarmPathParams;

    pub type APIResponse = AlarmResponse;
}
