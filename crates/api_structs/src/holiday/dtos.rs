use serde::{Deserialize, Serialize};
use wakeup_scheduler_domain::{Day, HolidayKind, HolidaySet};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HolidayDTO {
    pub day: Day,
    pub kind: HolidayKind,
    pub name: Option<String>,
}

impl HolidayDTO {
    pub fn new(day: Day, holidays: &HolidaySet) -> Option<Self> {
        let kind = holidays.kind(day)?;
        Some(Self {
            day,
            kind,
            name: holidays.national_holiday(day).map(|h| h.to_string()),
        })
    }
}
