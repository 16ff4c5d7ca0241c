use chrono::{prelude::*, Duration, LocalResult};
use chrono_tz::Tz;
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// A calendar date without any time component. Overrides, one-off dates
/// and holidays are all keyed by `Day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Day(NaiveDate);

#[derive(Error, Debug, PartialEq)]
pub enum InvalidDayError {
    #[error("Day: {0} is malformed, expected YYYY-MM-DD")]
    Malformed(String),
    #[error("Day: {0} does not exist")]
    OutOfRange(String),
}

pub fn is_valid_date(datestr: &str) -> Result<(i32, u32, u32), InvalidDayError> {
    let dates = datestr.split('-').collect::<Vec<_>>();
    if dates.len() != 3 {
        return Err(InvalidDayError::Malformed(datestr.to_string()));
    }
    let parsed = (
        dates[0].parse::<i32>(),
        dates[1].parse::<u32>(),
        dates[2].parse::<u32>(),
    );
    let (year, month, day) = match parsed {
        (Ok(year), Ok(month), Ok(day)) => (year, month, day),
        _ => return Err(InvalidDayError::Malformed(datestr.to_string())),
    };

    if !(1970..=2100).contains(&year) || NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return Err(InvalidDayError::OutOfRange(datestr.to_string()));
    }

    Ok((year, month, day))
}

impl Day {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The local calendar day of the given instant
    pub fn from_timestamp_millis(timestamp_millis: i64, tz: &Tz) -> Option<Self> {
        DateTime::from_timestamp_millis(timestamp_millis)
            .map(|dt| Self(dt.with_timezone(tz).date_naive()))
    }

    /// The `n`th (1 based) occurrence of `weekday` in the given month
    pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<Self> {
        NaiveDate::from_weekday_of_month_opt(year, month, weekday, n).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn inc(&mut self) {
        *self = self.succ();
    }

    pub fn succ(&self) -> Self {
        self.add_days(1)
    }

    pub fn pred(&self) -> Self {
        self.add_days(-1)
    }

    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Days from `self` until `other`, negative if `other` is earlier
    pub fn days_until(&self, other: &Day) -> i64 {
        (other.0 - self.0).num_days()
    }

    pub fn at(&self, time: TimeOfDay) -> NaiveDateTime {
        self.0.and_time(time.naive())
    }

    /// Resolves a local wall clock time on this day to an instant in `tz`.
    ///
    /// A wall clock time skipped by a DST transition fires one hour later,
    /// an ambiguous one fires at its earliest instant.
    pub fn local_instant(&self, time: TimeOfDay, tz: &Tz) -> DateTime<Tz> {
        let local = self.at(time);
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                let shifted = local + Duration::hours(1);
                tz.from_local_datetime(&shifted)
                    .earliest()
                    .unwrap_or_else(|| tz.from_utc_datetime(&shifted))
            }
        }
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Day {
    type Err = InvalidDayError;

    fn from_str(datestr: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = is_valid_date(datestr)?;
        Day::new(year, month, day).ok_or_else(|| InvalidDayError::OutOfRange(datestr.to_string()))
    }
}

impl Serialize for Day {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DayVisitor;

        impl<'de> Visitor<'de> for DayVisitor {
            type Value = Day;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A date formatted as YYYY-MM-DD")
            }

            fn visit_str<E>(self, value: &str) -> Result<Day, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<Day>()
                    .map_err(|_| E::custom(format!("Malformed day: {}", value)))
            }
        }

        deserializer.deserialize_str(DayVisitor)
    }
}

/// Wall clock time of day with minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTimeOfDay", into = "RawTimeOfDay")]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidTimeError {
    #[error("Invalid time {hour}:{minute}, hour must be 0-23 and minute 0-59")]
    OutOfRange { hour: u32, minute: u32 },
    #[error("Time: {0} is malformed, expected HH:MM")]
    Malformed(String),
}

#[derive(Serialize, Deserialize)]
struct RawTimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, InvalidTimeError> {
        if hour > 23 || minute > 59 {
            return Err(InvalidTimeError::OutOfRange { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub(crate) const fn hm(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Minutes since midnight, 0-1439
    pub fn total_minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    pub fn naive(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidTimeError::Malformed(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(malformed)?;
        let hour = hour.parse::<u32>().map_err(|_| malformed())?;
        let minute = minute.parse::<u32>().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<RawTimeOfDay> for TimeOfDay {
    type Error = InvalidTimeError;

    fn try_from(raw: RawTimeOfDay) -> Result<Self, Self::Error> {
        Self::new(raw.hour, raw.minute)
    }
}

impl From<TimeOfDay> for RawTimeOfDay {
    fn from(time: TimeOfDay) -> Self {
        Self {
            hour: time.hour,
            minute: time.minute,
        }
    }
}
