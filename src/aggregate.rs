use crate::allocation::{Allocation, Percentage};
use crate::classify::{AllocationState, classify};
use crate::overlap::is_active_on;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Per-employee total for one day, borrowing the contributing allocations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeDayAggregate<'a> {
    pub employee_id: &'a str,
    /// Name from the employee's first contributing allocation.
    pub employee_name: &'a str,
    pub total_percentage: Percentage,
    pub allocations: Vec<&'a Allocation>,
}

impl<'a> EmployeeDayAggregate<'a> {
    fn start(allocation: &'a Allocation) -> Self {
        Self {
            employee_id: &allocation.employee_id,
            employee_name: &allocation.employee_name,
            total_percentage: allocation.allocation_percentage,
            allocations: vec![allocation],
        }
    }

    fn push(&mut self, allocation: &'a Allocation) {
        self.total_percentage += allocation.allocation_percentage;
        self.allocations.push(allocation);
    }

    pub fn state(&self) -> AllocationState {
        classify(self.total_percentage)
    }
}

/// Groups the allocations active on `day` by employee.
///
/// Output is ordered by each employee's first active allocation in the input,
/// and each group's allocations keep input order.
pub fn aggregate_for_day(
    allocations: &[Allocation],
    day: NaiveDate,
) -> Vec<EmployeeDayAggregate<'_>> {
    let mut aggregates: Vec<EmployeeDayAggregate<'_>> = Vec::new();
    let mut index_by_employee: HashMap<&str, usize> = HashMap::new();

    for allocation in allocations.iter().filter(|a| is_active_on(a, day)) {
        match index_by_employee.get(allocation.employee_id.as_str()) {
            Some(&idx) => {
                let aggregate = &mut aggregates[idx];
                if aggregate.employee_name != allocation.employee_name {
                    log::debug!(
                        "employee {} has conflicting names '{}' and '{}' on {}; keeping first",
                        allocation.employee_id,
                        aggregate.employee_name,
                        allocation.employee_name,
                        day
                    );
                }
                aggregate.push(allocation);
            }
            None => {
                index_by_employee.insert(&allocation.employee_id, aggregates.len());
                aggregates.push(EmployeeDayAggregate::start(allocation));
            }
        }
    }

    aggregates
}
