use crate::{
    alarm::{AlarmRule, Recurrence},
    date::Day,
};
use chrono::Weekday;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
    ops::RangeInclusive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NationalHoliday {
    NewYearsDay,
    ComingOfAgeDay,
    NationalFoundationDay,
    EmperorsBirthday,
    VernalEquinoxDay,
    ShowaDay,
    ConstitutionMemorialDay,
    GreeneryDay,
    ChildrensDay,
    MarineDay,
    MountainDay,
    RespectForTheAgedDay,
    AutumnalEquinoxDay,
    SportsDay,
    CultureDay,
    LaborThanksgivingDay,
    /// A day sandwiched between two national holidays
    CitizensHoliday,
    /// Observed in place of a holiday falling on a Sunday
    SubstituteHoliday,
    /// Reported by an external holiday feed
    Observed,
}

impl NationalHoliday {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewYearsDay => "New Year's Day",
            Self::ComingOfAgeDay => "Coming of Age Day",
            Self::NationalFoundationDay => "National Foundation Day",
            Self::EmperorsBirthday => "The Emperor's Birthday",
            Self::VernalEquinoxDay => "Vernal Equinox Day",
            Self::ShowaDay => "Showa Day",
            Self::ConstitutionMemorialDay => "Constitution Memorial Day",
            Self::GreeneryDay => "Greenery Day",
            Self::ChildrensDay => "Children's Day",
            Self::MarineDay => "Marine Day",
            Self::MountainDay => "Mountain Day",
            Self::RespectForTheAgedDay => "Respect for the Aged Day",
            Self::AutumnalEquinoxDay => "Autumnal Equinox Day",
            Self::SportsDay => "Sports Day",
            Self::CultureDay => "Culture Day",
            Self::LaborThanksgivingDay => "Labor Thanksgiving Day",
            Self::CitizensHoliday => "Citizens' Holiday",
            Self::SubstituteHoliday => "Substitute Holiday",
            Self::Observed => "Observed Holiday",
        }
    }
}

impl Display for NationalHoliday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HolidayKind {
    National,
    Custom,
}

/// Which recurring alarms are silenced on holidays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HolidayPolicy {
    /// Only "weekdays" alarms skip holidays
    #[default]
    WeekdaysOnly,
    /// Every recurring alarm skips holidays
    AllRecurring,
}

impl HolidayPolicy {
    pub fn suppresses(&self, recurrence: &Recurrence) -> bool {
        match self {
            Self::WeekdaysOnly => recurrence.is_weekdays_only(),
            Self::AllRecurring => recurrence.is_recurring(),
        }
    }

    /// Whether `rule` skips holidays. A rule's own `holiday_aware` flag wins
    /// over the policy. Non-recurring rules never skip anything.
    pub fn skips_holidays(&self, rule: &AlarmRule) -> bool {
        rule.recurrence.is_recurring()
            && rule
                .holiday_aware
                .unwrap_or_else(|| self.suppresses(&rule.recurrence))
    }
}

impl std::str::FromStr for HolidayPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekdays-only" => Ok(Self::WeekdaysOnly),
            "all-recurring" => Ok(Self::AllRecurring),
            _ => Err(format!("Unknown holiday policy: {}", s)),
        }
    }
}

/// National holidays unioned with the user's own days off
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HolidaySet {
    national: BTreeMap<Day, NationalHoliday>,
    custom: BTreeSet<Day>,
}

impl HolidaySet {
    pub fn new(national: BTreeMap<Day, NationalHoliday>, custom: BTreeSet<Day>) -> Self {
        Self { national, custom }
    }

    pub fn contains(&self, day: Day) -> bool {
        self.national.contains_key(&day) || self.custom.contains(&day)
    }

    /// National wins when a day is both
    pub fn kind(&self, day: Day) -> Option<HolidayKind> {
        if self.national.contains_key(&day) {
            Some(HolidayKind::National)
        } else if self.custom.contains(&day) {
            Some(HolidayKind::Custom)
        } else {
            None
        }
    }

    pub fn national_holiday(&self, day: Day) -> Option<NationalHoliday> {
        self.national.get(&day).copied()
    }

    pub fn national(&self) -> &BTreeMap<Day, NationalHoliday> {
        &self.national
    }

    pub fn custom(&self) -> &BTreeSet<Day> {
        &self.custom
    }

    /// Every holiday in date order
    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.national.keys().merge(self.custom.iter()).dedup().copied()
    }

    pub fn between(&self, start: Day, end: Day) -> Vec<(Day, HolidayKind)> {
        self.days()
            .skip_while(|d| *d < start)
            .take_while(|d| *d <= end)
            .filter_map(|d| self.kind(d).map(|kind| (d, kind)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.days().count()
    }

    pub fn is_empty(&self) -> bool {
        self.national.is_empty() && self.custom.is_empty()
    }
}

struct FixedHoliday {
    month: u32,
    day: u32,
    holiday: NationalHoliday,
    years: RangeInclusive<i32>,
}

const FIXED_HOLIDAYS: &[FixedHoliday] = &[
    FixedHoliday { month: 1, day: 1, holiday: NationalHoliday::NewYearsDay, years: 1949..=9999 },
    FixedHoliday { month: 2, day: 11, holiday: NationalHoliday::NationalFoundationDay, years: 1967..=9999 },
    FixedHoliday { month: 2, day: 23, holiday: NationalHoliday::EmperorsBirthday, years: 2020..=9999 },
    FixedHoliday { month: 4, day: 29, holiday: NationalHoliday::GreeneryDay, years: 1989..=2006 },
    FixedHoliday { month: 4, day: 29, holiday: NationalHoliday::ShowaDay, years: 2007..=9999 },
    FixedHoliday { month: 5, day: 3, holiday: NationalHoliday::ConstitutionMemorialDay, years: 1949..=9999 },
    FixedHoliday { month: 5, day: 4, holiday: NationalHoliday::GreeneryDay, years: 2007..=9999 },
    FixedHoliday { month: 5, day: 5, holiday: NationalHoliday::ChildrensDay, years: 1949..=9999 },
    FixedHoliday { month: 8, day: 11, holiday: NationalHoliday::MountainDay, years: 2016..=9999 },
    FixedHoliday { month: 11, day: 3, holiday: NationalHoliday::CultureDay, years: 1948..=9999 },
    FixedHoliday { month: 11, day: 23, holiday: NationalHoliday::LaborThanksgivingDay, years: 1948..=9999 },
    FixedHoliday { month: 12, day: 23, holiday: NationalHoliday::EmperorsBirthday, years: 1989..=2018 },
];

struct MondayHoliday {
    month: u32,
    nth: u8,
    holiday: NationalHoliday,
}

const MONDAY_HOLIDAYS: &[MondayHoliday] = &[
    MondayHoliday { month: 1, nth: 2, holiday: NationalHoliday::ComingOfAgeDay },
    MondayHoliday { month: 7, nth: 3, holiday: NationalHoliday::MarineDay },
    MondayHoliday { month: 9, nth: 3, holiday: NationalHoliday::RespectForTheAgedDay },
    MondayHoliday { month: 10, nth: 2, holiday: NationalHoliday::SportsDay },
];

const SPRING_EQUINOX_BASE: f64 = 20.8431;
const AUTUMN_EQUINOX_BASE: f64 = 23.2488;

/// Day of month of an equinox. The approximation holds for 1980-2099.
pub fn equinox_day(year: i32, base: f64) -> u32 {
    let elapsed = (year - 1980) as f64;
    (base + 0.242194 * elapsed - (elapsed / 4.0).floor()).floor() as u32
}

/// Computes the Japanese national holiday calendar.
///
/// Targets the holiday law from 2000 onwards: "Happy Monday" holidays,
/// equinox days, citizens' holidays and transitive substitute holidays.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalculator {}

impl HolidayCalculator {
    pub fn new() -> Self {
        Self {}
    }

    pub fn national_holidays(&self, year: i32) -> BTreeMap<Day, NationalHoliday> {
        let mut holidays = BTreeMap::new();

        for fixed in FIXED_HOLIDAYS.iter().filter(|h| h.years.contains(&year)) {
            if let Some(day) = Day::new(year, fixed.month, fixed.day) {
                holidays.insert(day, fixed.holiday);
            }
        }
        for monday in MONDAY_HOLIDAYS {
            if let Some(day) = Day::nth_weekday_of_month(year, monday.month, Weekday::Mon, monday.nth)
            {
                holidays.insert(day, monday.holiday);
            }
        }
        let equinoxes = [
            (3, SPRING_EQUINOX_BASE, NationalHoliday::VernalEquinoxDay),
            (9, AUTUMN_EQUINOX_BASE, NationalHoliday::AutumnalEquinoxDay),
        ];
        for (month, base, holiday) in equinoxes {
            if let Some(day) = Day::new(year, month, equinox_day(year, base)) {
                holidays.insert(day, holiday);
            }
        }

        apply_olympic_moves(year, &mut holidays);
        apply_citizens_holidays(&mut holidays);
        apply_substitute_holidays(&mut holidays);
        holidays
    }

    /// National holidays of every year in `years`, unioned with days
    /// reported by an external feed and the user's custom holidays
    pub fn holiday_set<C, O>(&self, years: RangeInclusive<i32>, custom: C, observed: O) -> HolidaySet
    where
        C: IntoIterator<Item = Day>,
        O: IntoIterator<Item = Day>,
    {
        let mut national = BTreeMap::new();
        for year in years {
            national.extend(self.national_holidays(year));
        }
        for day in observed {
            national.entry(day).or_insert(NationalHoliday::Observed);
        }
        HolidaySet::new(national, custom.into_iter().collect())
    }
}

/// The 2020 and 2021 Olympics moved three holidays
fn apply_olympic_moves(year: i32, holidays: &mut BTreeMap<Day, NationalHoliday>) {
    let moves: &[(NationalHoliday, u32, u32)] = match year {
        2020 => &[
            (NationalHoliday::MarineDay, 7, 23),
            (NationalHoliday::SportsDay, 7, 24),
            (NationalHoliday::MountainDay, 8, 10),
        ],
        2021 => &[
            (NationalHoliday::MarineDay, 7, 22),
            (NationalHoliday::SportsDay, 7, 23),
            (NationalHoliday::MountainDay, 8, 8),
        ],
        _ => return,
    };
    for (holiday, month, day) in moves {
        holidays.retain(|_, h| h != holiday);
        if let Some(day) = Day::new(year, *month, *day) {
            holidays.insert(day, *holiday);
        }
    }
}

/// A weekday sandwiched between two holidays becomes a holiday
pub fn apply_citizens_holidays(holidays: &mut BTreeMap<Day, NationalHoliday>) {
    let sandwiched = holidays
        .keys()
        .tuple_windows()
        .filter(|(before, after)| before.days_until(after) == 2)
        .map(|(before, _)| before.succ())
        .filter(|day| day.weekday() != Weekday::Sun)
        .collect::<Vec<_>>();
    for day in sandwiched {
        holidays.entry(day).or_insert(NationalHoliday::CitizensHoliday);
    }
}

/// Every holiday on a Sunday adds the next day that is not already a
/// holiday. Runs of consecutive holidays push the substitute past all of them.
pub fn apply_substitute_holidays(holidays: &mut BTreeMap<Day, NationalHoliday>) {
    let sundays = holidays
        .keys()
        .filter(|day| day.weekday() == Weekday::Sun)
        .copied()
        .collect::<Vec<_>>();
    for sunday in sundays {
        let mut candidate = sunday.succ();
        while holidays.contains_key(&candidate) {
            candidate.inc();
        }
        holidays.insert(candidate, NationalHoliday::SubstituteHoliday);
    }
}
