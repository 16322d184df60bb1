use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Weekday};

use crate::utils::calendar::additions::TimeStart;
use crate::utils::calendar::formats::weekday_name;

use super::models::Window;

/// The instant analytics are computed at, plus the first day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalyticsClock {
    #[serde(with = "time::serde::timestamp")]
    pub now: OffsetDateTime,
    #[serde(with = "weekday_name")]
    pub week_starts_on: Weekday,
}

impl AnalyticsClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self {
            now,
            week_starts_on: Weekday::Sunday,
        }
    }

    pub fn with_week_start(now: OffsetDateTime, week_starts_on: Weekday) -> Self {
        Self {
            now,
            week_starts_on,
        }
    }

    /// Inclusive lower bound of the window; `None` for [`Window::All`].
    pub fn window_start(&self, window: Window) -> Option<OffsetDateTime> {
        match window {
            Window::Day => Some(self.now.day_start()),
            Window::Week => Some(self.now.week_start(self.week_starts_on)),
            Window::Month => Some(self.now.month_start()),
            Window::Year => Some(self.now.year_start()),
            Window::All => None,
        }
    }

    pub fn includes(&self, window: Window, timestamp: OffsetDateTime) -> bool {
        self.window_start(window)
            .map_or(true, |start| timestamp >= start)
    }

    /// Calendar-date variant used for guestlist dates.
    pub fn includes_date(&self, window: Window, date: Date) -> bool {
        self.window_start(window)
            .map_or(true, |start| date >= start.date())
    }
}
