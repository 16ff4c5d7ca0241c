use super::IHolidayFeed;
use reqwest::Client;
use tracing::warn;
use url::Url;
use wakeup_scheduler_domain::Day;

/// Holidays published as an iCalendar document, e.g. a public holiday calendar
pub struct IcsHolidayFeed {
    client: Client,
    url: Url,
}

impl IcsHolidayFeed {
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    async fn fetch(&self) -> anyhow::Result<String> {
        let res = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(res.text().await?)
    }
}

#[async_trait::async_trait]
impl IHolidayFeed for IcsHolidayFeed {
    async fn holidays_between(&self, start: Day, end: Day) -> Option<Vec<Day>> {
        let body = match self.fetch().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Holiday feed at: {} is unavailable: {:?}", self.url, e);
                return None;
            }
        };
        Some(
            parse_ics_dates(&body)
                .into_iter()
                .filter(|d| *d >= start && *d <= end)
                .collect(),
        )
    }
}

/// Start dates of all events in an iCalendar document
pub fn parse_ics_dates(ics: &str) -> Vec<Day> {
    // Lines starting with whitespace continue the previous line
    let mut lines: Vec<String> = Vec::new();
    for line in ics.lines() {
        let line = line.trim_end_matches('\r');
        let continuation = line.strip_prefix(' ').or_else(|| line.strip_prefix('\t'));
        if let (Some(continuation), Some(last)) = (continuation, lines.last_mut()) {
            last.push_str(continuation);
            continue;
        }
        lines.push(line.to_string());
    }

    let mut days = lines
        .iter()
        .filter(|line| line.starts_with("DTSTART"))
        .filter_map(|line| line.split_once(':').map(|(_, value)| value.trim()))
        .filter_map(|value| {
            let date = value.get(0..8)?;
            let year = date.get(0..4)?.parse().ok()?;
            let month = date.get(4..6)?.parse().ok()?;
            let day = date.get(6..8)?.parse().ok()?;
            Day::new(year, month, day)
        })
        .collect::<Vec<_>>();
    days.sort();
    days.dedup();
    days
}
