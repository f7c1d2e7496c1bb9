use crate::allocation::Percentage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Allocation state of a summed percentage relative to 100 %.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationState {
    Under,
    Exact,
    Over,
}

impl AllocationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationState::Under => "under",
            AllocationState::Exact => "exact",
            AllocationState::Over => "over",
        }
    }
}

impl fmt::Display for AllocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact comparison against [`Percentage::FULL`]; no tolerance is applied.
pub fn classify(total_percentage: Percentage) -> AllocationState {
    match total_percentage.cmp(&Percentage::FULL) {
        std::cmp::Ordering::Less => AllocationState::Under,
        std::cmp::Ordering::Equal => AllocationState::Exact,
        std::cmp::Ordering::Greater => AllocationState::Over,
    }
}
