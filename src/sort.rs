//! Sort engine.
//!
//! Stable sort over a field. String columns compare case-insensitively,
//! numeric columns compare numerically. No secondary key: records with equal
//! keys keep their prior relative order, which is what makes re-sorting a
//! filtered view predictable.

use std::cmp::Ordering;

use crate::types::{Account, SortDirection, SortField, SortState};

/// Sort `accounts` in place by the given field and direction.
pub fn sort_accounts(accounts: &mut [Account], sort: SortState) {
    accounts.sort_by(|a, b| {
        let ordering = compare_by_field(a, b, sort.field);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_by_field(a: &Account, b: &Account, field: SortField) -> Ordering {
    match field {
        SortField::CompanyName => str_cmp(&a.company_name, &b.company_name),
        SortField::AssignedTo => str_cmp(&a.assigned_to, &b.assigned_to),
        SortField::AccountType => str_cmp(&a.account_type, &b.account_type),
        SortField::ProspectScore => a.prospect_score.cmp(&b.prospect_score),
        SortField::RevenueEstimate => str_cmp(&a.revenue_estimate, &b.revenue_estimate),
        SortField::Employees => a.employees.cmp(&b.employees),
        SortField::HeadOffice => str_cmp(&a.head_office, &b.head_office),
        SortField::Country => str_cmp(&a.country, &b.country),
        SortField::Segmentation => str_cmp(&a.segmentation, &b.segmentation),
    }
}

fn str_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
