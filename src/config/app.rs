use anyhow::Context;
use serde::Deserialize;
use time::{OffsetDateTime, UtcOffset, Weekday};
use tracing::warn;

use crate::config::{get_env, try_get_env};
use crate::utils::analytics::windows::AnalyticsClock;
use crate::utils::calendar::formats::parse_weekday;

pub const NAME_UTC_OFFSET: &str = "UTC_OFFSET_HOURS";
pub const NAME_WEEK_START: &str = "WEEK_STARTS_ON";

const DEFAULT_UTC_OFFSET_HOURS: i8 = 0;
const DEFAULT_WEEK_START: Weekday = Weekday::Sunday;

#[derive(Deserialize)]
pub struct EngineSettingsModel {
    pub utc_offset_hours: Option<i8>,
    pub week_starts_on: Option<String>,
}

impl EngineSettingsModel {
    pub fn to_settings(self) -> anyhow::Result<EngineSettings> {
        let hours = self.utc_offset_hours.unwrap_or_else(|| {
            warn!("Using default UTC offset");
            DEFAULT_UTC_OFFSET_HOURS
        });
        let week_starts_on = match self.week_starts_on {
            Some(name) => parse_weekday(&name)?,
            None => {
                warn!("Using default week start");
                DEFAULT_WEEK_START
            }
        };

        EngineSettings::new(hours, week_starts_on)
    }
}

/// Clock settings of the host. The engine itself only sees the values
/// derived from them through [`EngineSettings::clock`].
#[derive(Clone, Debug)]
pub struct EngineSettings {
    pub utc_offset: UtcOffset,
    pub week_starts_on: Weekday,
}

impl EngineSettings {
    pub fn new(utc_offset_hours: i8, week_starts_on: Weekday) -> anyhow::Result<Self> {
        let utc_offset = UtcOffset::from_hms(utc_offset_hours, 0, 0)
            .with_context(|| format!("Invalid UTC offset: {utc_offset_hours} hours"))?;
        Ok(Self {
            utc_offset,
            week_starts_on,
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let hours = get_env(NAME_UTC_OFFSET)?
            .parse::<i8>()
            .context("Invalid UTC offset")?;
        let week_starts_on = match try_get_env(NAME_WEEK_START) {
            Some(name) => parse_weekday(&name)?,
            None => DEFAULT_WEEK_START,
        };
        Self::new(hours, week_starts_on)
    }

    pub fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.utc_offset)
    }

    pub fn clock(&self) -> AnalyticsClock {
        AnalyticsClock::with_week_start(self.now(), self.week_starts_on)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            utc_offset: UtcOffset::UTC,
            week_starts_on: DEFAULT_WEEK_START,
        }
    }
}
