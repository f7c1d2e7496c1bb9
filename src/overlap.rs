use crate::allocation::Allocation;
use chrono::NaiveDate;

/// Inclusive interval intersection between an allocation and
/// `[window_start, window_end]`. Touching endpoints count as overlap.
///
/// Malformed allocations (`start_date > end_date`) and inverted windows never
/// overlap.
pub fn overlaps(allocation: &Allocation, window_start: NaiveDate, window_end: NaiveDate) -> bool {
    allocation.is_well_formed()
        && window_start <= window_end
        && allocation.start_date <= window_end
        && allocation.end_date >= window_start
}

/// Single-day form of [`overlaps`].
pub fn is_active_on(allocation: &Allocation, day: NaiveDate) -> bool {
    overlaps(allocation, day, day)
}

/// Allocations overlapping the window, in input order.
pub fn overlapping<'a>(
    allocations: &'a [Allocation],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> impl Iterator<Item = &'a Allocation> {
    allocations
        .iter()
        .filter(move |allocation| overlaps(allocation, window_start, window_end))
}
