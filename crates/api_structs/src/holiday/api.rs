use crate::dtos::HolidayDTO;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use wakeup_scheduler_domain::Day;

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomHolidaysResponse {
    pub custom_holidays: Vec<Day>,
}

impl CustomHolidaysResponse {
    pub fn new(days: BTreeSet<Day>) -> Self {
        Self {
            custom_holidays: days.into_iter().collect(),
        }
    }
}

pub mod get_holidays {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub year: Option<i32>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub year: i32,
        pub holidays: Vec<HolidayDTO>,
    }
}

pub mod add_custom_holiday {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub day: Day,
    }

    pub type APIResponse = CustomHolidaysResponse;
}

pub mod remove_custom_holiday {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub day: Day,
    }

    pub type APIResponse = CustomHolidaysResponse;
}
