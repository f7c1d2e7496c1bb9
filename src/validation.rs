use crate::allocation::Allocation;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Data-quality findings on an allocation list. Informational only; the
/// engine computes views regardless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationIssue {
    BlankId { index: usize },
    BlankEmployeeId { id: String },
    DuplicateId { id: String },
    NegativePercentage { id: String },
    MalformedInterval {
        id: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    ConflictingEmployeeName {
        employee_id: String,
        first: String,
        conflicting: String,
    },
}

impl fmt::Display for AllocationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationIssue::BlankId { index } => write!(f, "allocation #{index} has a blank id"),
            AllocationIssue::BlankEmployeeId { id } => {
                write!(f, "allocation {id} has a blank employee_id")
            }
            AllocationIssue::DuplicateId { id } => write!(f, "duplicate allocation id {id}"),
            AllocationIssue::NegativePercentage { id } => {
                write!(f, "allocation {id} has a negative allocation_percentage")
            }
            AllocationIssue::MalformedInterval {
                id,
                start_date,
                end_date,
            } => write!(
                f,
                "allocation {id} starts {start_date} after it ends {end_date}; it will never be shown"
            ),
            AllocationIssue::ConflictingEmployeeName {
                employee_id,
                first,
                conflicting,
            } => write!(
                f,
                "employee {employee_id} is named both '{first}' and '{conflicting}'; '{first}' is used"
            ),
        }
    }
}

pub fn validate_allocations(allocations: &[Allocation]) -> Vec<AllocationIssue> {
    let mut issues = Vec::new();
    let mut seen_ids = HashSet::with_capacity(allocations.len());
    let mut names: HashMap<&str, &str> = HashMap::new();
    let mut conflicted: HashSet<&str> = HashSet::new();

    for (index, allocation) in allocations.iter().enumerate() {
        let id = allocation.id.trim();
        if id.is_empty() {
            issues.push(AllocationIssue::BlankId { index });
        } else if !seen_ids.insert(id) {
            issues.push(AllocationIssue::DuplicateId { id: id.to_string() });
        }

        if allocation.employee_id.trim().is_empty() {
            issues.push(AllocationIssue::BlankEmployeeId {
                id: allocation.id.clone(),
            });
        }
        if allocation.allocation_percentage.is_negative() {
            issues.push(AllocationIssue::NegativePercentage {
                id: allocation.id.clone(),
            });
        }
        if !allocation.is_well_formed() {
            issues.push(AllocationIssue::MalformedInterval {
                id: allocation.id.clone(),
                start_date: allocation.start_date,
                end_date: allocation.end_date,
            });
        }

        let first = *names
            .entry(allocation.employee_id.as_str())
            .or_insert(allocation.employee_name.as_str());
        if first != allocation.employee_name && conflicted.insert(allocation.employee_id.as_str()) {
            issues.push(AllocationIssue::ConflictingEmployeeName {
                employee_id: allocation.employee_id.clone(),
                first: first.to_string(),
                conflicting: allocation.employee_name.clone(),
            });
        }
    }

    issues
}
