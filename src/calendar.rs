use crate::aggregate::{EmployeeDayAggregate, aggregate_for_day};
use crate::allocation::Allocation;
use crate::classify::AllocationState;
use chrono::{Datelike, Duration, Months, NaiveDate};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedAggregate<'a> {
    #[serde(flatten)]
    pub aggregate: EmployeeDayAggregate<'a>,
    pub state: AllocationState,
}

impl<'a> From<EmployeeDayAggregate<'a>> for ClassifiedAggregate<'a> {
    fn from(aggregate: EmployeeDayAggregate<'a>) -> Self {
        let state = aggregate.state();
        Self { aggregate, state }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub aggregates: Vec<ClassifiedAggregate<'a>>,
}

impl<'a> CalendarDay<'a> {
    pub fn build(allocations: &'a [Allocation], date: NaiveDate) -> Self {
        let aggregates = aggregate_for_day(allocations, date)
            .into_iter()
            .map(ClassifiedAggregate::from)
            .collect();
        Self { date, aggregates }
    }
}

/// Count of (day, employee) cells per allocation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AllocationSummary {
    pub under: usize,
    pub exact: usize,
    pub over: usize,
}

impl AllocationSummary {
    pub fn record(&mut self, state: AllocationState) {
        match state {
            AllocationState::Under => self.under += 1,
            AllocationState::Exact => self.exact += 1,
            AllocationState::Over => self.over += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.under + self.exact + self.over
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthView<'a> {
    /// e.g. "March 2024"
    pub month_label: String,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub days: Vec<CalendarDay<'a>>,
}

impl<'a> MonthView<'a> {
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay<'a>> {
        self.days.iter().find(|day| day.date == date)
    }

    pub fn summary(&self) -> AllocationSummary {
        let mut summary = AllocationSummary::default();
        for cell in self.days.iter().flat_map(|day| day.aggregates.iter()) {
            summary.record(cell.state);
        }
        summary
    }

    /// Over-allocated cells in date order.
    pub fn over_allocated(&self) -> Vec<(NaiveDate, &ClassifiedAggregate<'a>)> {
        self.days
            .iter()
            .flat_map(|day| day.aggregates.iter().map(move |cell| (day.date, cell)))
            .filter(|(_, cell)| cell.state == AllocationState::Over)
            .collect()
    }
}

/// First and last calendar day of the month containing `reference`.
pub fn month_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = reference - Duration::days(i64::from(reference.day0()));
    let last = first
        .iter_days()
        .take_while(|date| date.month() == first.month())
        .last()
        .unwrap_or(first);
    (first, last)
}

/// Every day of the month containing `reference`, ascending.
pub fn days_in_month(reference: NaiveDate) -> Vec<NaiveDate> {
    let (first, last) = month_bounds(reference);
    first.iter_days().take_while(|date| *date <= last).collect()
}

pub fn month_label(reference: NaiveDate) -> String {
    reference.format("%B %Y").to_string()
}

/// Builds the per-day, per-employee view for the month containing
/// `reference`. Days are evaluated in parallel; output stays in date order.
pub fn build_month(allocations: &[Allocation], reference: NaiveDate) -> MonthView<'_> {
    let (first_day, last_day) = month_bounds(reference);
    let days: Vec<CalendarDay<'_>> = days_in_month(reference)
        .into_par_iter()
        .map(|date| CalendarDay::build(allocations, date))
        .collect();

    log::debug!(
        "built month view {}..{} over {} allocations",
        first_day,
        last_day,
        allocations.len()
    );

    MonthView {
        month_label: month_label(reference),
        first_day,
        last_day,
        days,
    }
}

/// `reference` moved forward one calendar month, clamping the day-of-month.
pub fn next_month(reference: NaiveDate) -> Option<NaiveDate> {
    reference.checked_add_months(Months::new(1))
}

/// `reference` moved back one calendar month, clamping the day-of-month.
pub fn prev_month(reference: NaiveDate) -> Option<NaiveDate> {
    reference.checked_sub_months(Months::new(1))
}
