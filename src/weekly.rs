use crate::allocation::Allocation;
use crate::config::ViewConfig;
use crate::overlap::overlapping;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

pub const DEFAULT_WEEK_COUNT: i32 = 12;

/// Seven-day window with the raw allocations overlapping it, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekWindow<'a> {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub allocations: Vec<&'a Allocation>,
}

impl<'a> WeekWindow<'a> {
    /// "Mar 10 - Mar 16, 2024"
    pub fn label(&self) -> String {
        format!(
            "{} - {}, {}",
            self.start.format("%b %-d"),
            self.end.format("%b %-d"),
            self.end.year()
        )
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}

/// The week containing `anchor`: the most recent `week_start` on or before
/// it, through six days later.
pub fn week_range(anchor: NaiveDate, week_start: Weekday) -> Option<(NaiveDate, NaiveDate)> {
    let offset =
        (7 + anchor.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    let start = anchor.checked_sub_days(Days::new(u64::from(offset)))?;
    let end = start.checked_add_days(Days::new(6))?;
    Some((start, end))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindowBuilder {
    week_start: Weekday,
    week_count: i32,
}

impl Default for WeekWindowBuilder {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            week_count: DEFAULT_WEEK_COUNT,
        }
    }
}

impl From<&ViewConfig> for WeekWindowBuilder {
    fn from(config: &ViewConfig) -> Self {
        Self {
            week_start: config.week_start,
            week_count: config.week_count,
        }
    }
}

impl WeekWindowBuilder {
    pub fn new(week_start: Weekday, week_count: i32) -> Self {
        Self {
            week_start,
            week_count,
        }
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn week_count(&self) -> i32 {
        self.week_count
    }

    pub fn with_week_count(mut self, week_count: i32) -> Self {
        self.week_count = week_count;
        self
    }

    /// Consecutive windows ending with the one containing `now`, oldest
    /// first. A non-positive week count yields no windows.
    pub fn build<'a>(&self, allocations: &'a [Allocation], now: NaiveDate) -> Vec<WeekWindow<'a>> {
        let count = u64::try_from(self.week_count).unwrap_or(0);
        let mut windows = Vec::new();

        for i in 0..count {
            let Some((start, end)) = now
                .checked_sub_days(Days::new(7 * i))
                .and_then(|anchor| week_range(anchor, self.week_start))
            else {
                log::debug!("week window {i} before {now} is out of range; stopping");
                break;
            };
            windows.push(WeekWindow {
                start,
                end,
                allocations: overlapping(allocations, start, end).collect(),
            });
        }

        windows.reverse();
        windows
    }
}

/// Sunday-start trailing windows; see [`WeekWindowBuilder::build`].
pub fn build_trailing_weeks(
    allocations: &[Allocation],
    now: NaiveDate,
    week_count: i32,
) -> Vec<WeekWindow<'_>> {
    WeekWindowBuilder::new(Weekday::Sun, week_count).build(allocations, now)
}
