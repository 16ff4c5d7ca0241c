use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// A subset of the seven weekdays.
///
/// Weekdays are numbered the way alarm rules are persisted:
/// Sunday = 1, Monday = 2, ... Saturday = 7.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

const ALL_DAYS: u8 = 0b111_1111;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidWeekdayError {
    #[error("Invalid weekday number: {0}, expected 1 (Sunday) to 7 (Saturday)")]
    InvalidNumber(u8),
    #[error("Invalid weekday specified: {0}")]
    InvalidWeekdayIdentifier(String),
}

impl WeekdaySet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn every_day() -> Self {
        Self(ALL_DAYS)
    }

    /// Monday to Friday
    pub fn weekdays() -> Self {
        Self::from_weekdays(&[
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ])
    }

    pub fn weekend() -> Self {
        Self::from_weekdays(&[Weekday::Sat, Weekday::Sun])
    }

    pub fn from_weekdays(weekdays: &[Weekday]) -> Self {
        let mut set = Self::empty();
        for wday in weekdays {
            set.insert(*wday);
        }
        set
    }

    pub fn from_numbers(numbers: &[u8]) -> Result<Self, InvalidWeekdayError> {
        let mut set = Self::empty();
        for number in numbers {
            set.insert(number_to_weekday(*number)?);
        }
        Ok(set)
    }

    pub fn insert(&mut self, wday: Weekday) {
        self.0 |= 1 << wday.num_days_from_sunday();
    }

    pub fn remove(&mut self, wday: Weekday) {
        self.0 &= !(1 << wday.num_days_from_sunday());
    }

    pub fn contains(&self, wday: Weekday) -> bool {
        self.0 & (1 << wday.num_days_from_sunday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Sunday first, matching the persisted numbering
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        (1..=7)
            .filter_map(|n| number_to_weekday(n).ok())
            .filter(move |wday| self.contains(*wday))
    }

    pub fn numbers(&self) -> Vec<u8> {
        self.iter().map(weekday_to_number).collect()
    }
}

pub fn weekday_to_number(wday: Weekday) -> u8 {
    wday.num_days_from_sunday() as u8 + 1
}

fn number_to_weekday(number: u8) -> Result<Weekday, InvalidWeekdayError> {
    match number {
        1 => Ok(Weekday::Sun),
        2 => Ok(Weekday::Mon),
        3 => Ok(Weekday::Tue),
        4 => Ok(Weekday::Wed),
        5 => Ok(Weekday::Thu),
        6 => Ok(Weekday::Fri),
        7 => Ok(Weekday::Sat),
        _ => Err(InvalidWeekdayError::InvalidNumber(number)),
    }
}

fn str_to_weekday(d: &str) -> Result<Weekday, InvalidWeekdayError> {
    match d.trim().to_uppercase().as_str() {
        "MO" => Ok(Weekday::Mon),
        "TU" => Ok(Weekday::Tue),
        "WE" => Ok(Weekday::Wed),
        "TH" => Ok(Weekday::Thu),
        "FR" => Ok(Weekday::Fri),
        "SA" => Ok(Weekday::Sat),
        "SU" => Ok(Weekday::Sun),
        _ => Err(InvalidWeekdayError::InvalidWeekdayIdentifier(d.to_string())),
    }
}

fn weekday_to_str(wday: Weekday) -> &'static str {
    match wday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

impl Display for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let codes = self.iter().map(weekday_to_str).collect::<Vec<_>>();
        write!(f, "{}", codes.join(","))
    }
}

/// Parses a comma separated list of two letter codes, e.g. `MO,WE,FR`
impl FromStr for WeekdaySet {
    type Err = InvalidWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = Self::empty();
        if s.trim().is_empty() {
            return Ok(set);
        }
        for code in s.split(',') {
            set.insert(str_to_weekday(code)?);
        }
        Ok(set)
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = InvalidWeekdayError;

    fn try_from(numbers: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_numbers(&numbers)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.numbers()
    }
}
