pub mod aggregate;
pub mod allocation;
pub mod calendar;
pub mod classify;
pub mod config;
pub mod department;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod overlap;
pub mod source;
pub mod validation;
pub mod weekly;

pub use aggregate::{EmployeeDayAggregate, aggregate_for_day};
pub use allocation::{Allocation, Percentage};
pub use calendar::{
    AllocationSummary, CalendarDay, ClassifiedAggregate, MonthView, build_month, month_bounds,
    next_month, prev_month,
};
pub use classify::{AllocationState, classify};
pub use config::{ConfigError, ViewConfig};
pub use department::{Department, DepartmentTree, Employee};
pub use overlap::{is_active_on, overlaps};
pub use source::{
    SourceError, SourceFormat, load_allocations, load_allocations_from_csv,
    load_allocations_from_json,
};
pub use validation::{AllocationIssue, validate_allocations};
pub use weekly::{WeekWindow, WeekWindowBuilder, build_trailing_weeks, week_range};
