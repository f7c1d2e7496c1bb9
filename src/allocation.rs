use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Percentage of an employee's time, stored as fixed-point micro-percent.
///
/// Sums are exact integer additions, so the 100 % boundary never drifts the
/// way repeated `f64` addition can.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "Option<f64>", into = "f64")]
pub struct Percentage(i64);

impl Percentage {
    /// Fixed-point units per whole percent.
    pub const SCALE: i64 = 1_000_000;
    pub const ZERO: Percentage = Percentage(0);
    pub const FULL: Percentage = Percentage(100 * Self::SCALE);

    pub const fn from_whole(pct: i64) -> Self {
        Self(pct.saturating_mul(Self::SCALE))
    }

    /// Rounds to the nearest micro-percent. Non-finite input becomes zero.
    pub fn from_f64(pct: f64) -> Self {
        if !pct.is_finite() {
            return Self::ZERO;
        }
        Self((pct * Self::SCALE as f64).round() as i64)
    }

    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    pub const fn units(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl From<Option<f64>> for Percentage {
    fn from(value: Option<f64>) -> Self {
        value.map(Percentage::from_f64).unwrap_or_default()
    }
}

impl From<Percentage> for f64 {
    fn from(value: Percentage) -> Self {
        value.as_f64()
    }
}

impl Add for Percentage {
    type Output = Percentage;

    fn add(self, rhs: Self) -> Self::Output {
        Percentage(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Percentage {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Percentage {
    fn sum<I: Iterator<Item = Percentage>>(iter: I) -> Self {
        iter.fold(Percentage::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Percentage> for Percentage {
    fn sum<I: Iterator<Item = &'a Percentage>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % Self::SCALE == 0 {
            write!(f, "{}%", self.0 / Self::SCALE)
        } else {
            write!(f, "{}%", self.as_f64())
        }
    }
}

/// An employee's assignment to a project for a percentage of time over an
/// inclusive range of calendar days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub project_name: String,
    #[serde(deserialize_with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "calendar_date")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub allocation_percentage: Percentage,
}

impl Allocation {
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        project_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        allocation_percentage: Percentage,
    ) -> Self {
        Self {
            id: id.into(),
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
            project_name: project_name.into(),
            start_date,
            end_date,
            allocation_percentage,
        }
    }

    /// `start_date <= end_date`. Malformed allocations never overlap anything.
    pub fn is_well_formed(&self) -> bool {
        self.start_date <= self.end_date
    }
}

/// Accepts `YYYY-MM-DD` or a timestamp and keeps only the calendar date as
/// written. No timezone conversion is applied.
pub(crate) fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(stamp.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(stamp.date());
        }
    }
    Err(format!("invalid calendar date '{raw}' (expected YYYY-MM-DD)"))
}
