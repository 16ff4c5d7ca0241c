use chrono_tz::Tz;
use std::{path::PathBuf, str::FromStr};
use tracing::{info, warn};
use url::Url;
use wakeup_scheduler_domain::{
    HolidayPolicy, ScheduleSettings, TimeOfDay, MAX_HORIZON_DAYS, MIN_HORIZON_DAYS,
};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Days, starting today, that concrete alarm events are computed for.
    /// Clamped to 30 - 64 days.
    pub horizon_days: u32,
    /// Timezone the alarm wall clock times are interpreted in
    pub timezone: Tz,
    /// Extra deliveries after the primary one for snooze enabled alarms
    pub snooze_count: u32,
    pub snooze_interval_minutes: u32,
    /// Local time on the evening before a holiday that the advisory fires at
    pub holiday_eve_time: TimeOfDay,
    pub holiday_policy: HolidayPolicy,
    /// Directory for persisted state. Kept in memory when absent.
    pub state_dir: Option<PathBuf>,
    /// Where computed schedules are pushed. Kept in memory when absent.
    pub delivery_webhook_url: Option<Url>,
    /// Optional iCalendar feed with observed holidays
    pub holiday_feed_url: Option<Url>,
    /// Interval in seconds between periodic schedule regenerations
    pub regeneration_interval_secs: u64,
}

const DEFAULT_PORT: usize = 5000;
const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;
const DEFAULT_SNOOZE_COUNT: u32 = 3;
const DEFAULT_SNOOZE_INTERVAL_MINUTES: u32 = 5;
const DEFAULT_REGENERATION_INTERVAL_SECS: u64 = 60 * 60;

impl Config {
    pub fn new() -> Self {
        let port = parse_env("PORT", DEFAULT_PORT);

        let horizon_days = parse_env("HORIZON_DAYS", MIN_HORIZON_DAYS);
        let horizon_days = if (MIN_HORIZON_DAYS..=MAX_HORIZON_DAYS).contains(&horizon_days) {
            horizon_days
        } else {
            let clamped = horizon_days.clamp(MIN_HORIZON_DAYS, MAX_HORIZON_DAYS);
            warn!(
                "The given HORIZON_DAYS: {} is outside of {} - {}, using {} instead.",
                horizon_days, MIN_HORIZON_DAYS, MAX_HORIZON_DAYS, clamped
            );
            clamped
        };

        let holiday_eve_time = parse_env("HOLIDAY_EVE_TIME", ScheduleSettings::default().holiday_eve_time);

        let state_dir = std::env::var("STATE_DIR").ok().map(PathBuf::from);
        if state_dir.is_none() {
            info!("Did not find STATE_DIR environment variable. State will only be kept in memory.");
        }

        Self {
            port,
            horizon_days,
            timezone: parse_env("TIMEZONE", DEFAULT_TIMEZONE),
            snooze_count: parse_env("SNOOZE_COUNT", DEFAULT_SNOOZE_COUNT),
            snooze_interval_minutes: parse_env(
                "SNOOZE_INTERVAL_MINUTES",
                DEFAULT_SNOOZE_INTERVAL_MINUTES,
            ),
            holiday_eve_time,
            holiday_policy: parse_env("HOLIDAY_POLICY", HolidayPolicy::default()),
            state_dir,
            delivery_webhook_url: parse_optional_env("DELIVERY_WEBHOOK_URL"),
            holiday_feed_url: parse_optional_env("HOLIDAY_FEED_URL"),
            regeneration_interval_secs: parse_env(
                "REGENERATION_INTERVAL_SECS",
                DEFAULT_REGENERATION_INTERVAL_SECS,
            ),
        }
    }

    pub fn schedule_settings(&self) -> ScheduleSettings {
        ScheduleSettings {
            horizon_days: self.horizon_days,
            timezone: self.timezone,
            snooze_count: self.snooze_count,
            snooze_interval_minutes: self.snooze_interval_minutes,
            holiday_eve_time: self.holiday_eve_time,
            holiday_policy: self.holiday_policy,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {:?}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_optional_env(name: &str) -> Option<Url> {
    let value = std::env::var(name).ok()?;
    match Url::parse(&value) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("The given {}: {} is not a valid url: {:?}. Ignoring it.", name, value, e);
            None
        }
    }
}
