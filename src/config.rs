use crate::weekly::{DEFAULT_WEEK_COUNT, WeekWindowBuilder};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use thiserror::Error;

pub const WEEK_START_ENV: &str = "ALLOCATION_VIEW_WEEK_START";
pub const WEEK_COUNT_ENV: &str = "ALLOCATION_VIEW_WEEK_COUNT";
/// Ten years of weekly windows.
pub const DEFAULT_MAX_WEEK_COUNT: i32 = 520;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("week count {count} exceeds the maximum of {max}")]
    WeekCountTooLarge { count: i32, max: i32 },
}

/// View settings shared by the CLI and HTTP surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub week_start: Weekday,
    pub week_count: i32,
    /// Upper bound for any requested week count.
    pub max_week_count: i32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            week_count: DEFAULT_WEEK_COUNT,
            max_week_count: DEFAULT_MAX_WEEK_COUNT,
        }
    }
}

impl ViewConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: ViewConfig = serde_json::from_reader(file)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        self.check_week_count(self.week_count)?;
        Ok(self)
    }

    pub fn check_week_count(&self, count: i32) -> Result<i32, ConfigError> {
        if count > self.max_week_count {
            return Err(ConfigError::WeekCountTooLarge {
                count,
                max: self.max_week_count,
            });
        }
        Ok(count)
    }

    /// Week builder for this config, with `week_count` replaced by
    /// `requested` when given. Counts above `max_week_count` are rejected.
    pub fn week_builder(&self, requested: Option<i32>) -> Result<WeekWindowBuilder, ConfigError> {
        let count = self.check_week_count(requested.unwrap_or(self.week_count))?;
        Ok(WeekWindowBuilder::new(self.week_start, count))
    }

    /// Applies `ALLOCATION_VIEW_WEEK_START` / `ALLOCATION_VIEW_WEEK_COUNT`
    /// when set.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(
            std::env::var(WEEK_START_ENV).ok().as_deref(),
            std::env::var(WEEK_COUNT_ENV).ok().as_deref(),
        )
    }

    pub fn with_overrides(
        mut self,
        week_start: Option<&str>,
        week_count: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = week_start {
            self.week_start = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: WEEK_START_ENV,
                value: raw.to_string(),
            })?;
        }
        if let Some(raw) = week_count {
            self.week_count = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: WEEK_COUNT_ENV,
                value: raw.to_string(),
            })?;
        }
        self.validate()
    }
}
