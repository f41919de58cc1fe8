//! Export formatter.
//!
//! Serializes account records to delimited text for download. Every data
//! value is wrapped in double quotes with embedded quotes doubled, so commas
//! and newlines inside notes survive a spreadsheet import. The header row is
//! written plain.

use chrono::Local;

use crate::types::Account;

/// Exportable columns; each knows its header label and how to read its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    CompanyName,
    AssignedTo,
    AccountType,
    ProspectScore,
    Website,
    RevenueEstimate,
    Employees,
    HeadOffice,
    Country,
    Segmentation,
    DropNotes,
    AccountNotes,
    Activity,
    Generation,
}

/// Column set for the full filtered-list export.
pub const EXPORT_COLUMNS: [Column; 11] = [
    Column::CompanyName,
    Column::AssignedTo,
    Column::AccountType,
    Column::ProspectScore,
    Column::Website,
    Column::RevenueEstimate,
    Column::Employees,
    Column::HeadOffice,
    Column::Country,
    Column::Segmentation,
    Column::DropNotes,
];

/// Column set for the comparison export.
pub const COMPARISON_COLUMNS: [Column; 11] = [
    Column::CompanyName,
    Column::AssignedTo,
    Column::AccountType,
    Column::ProspectScore,
    Column::RevenueEstimate,
    Column::Employees,
    Column::HeadOffice,
    Column::Country,
    Column::Segmentation,
    Column::Activity,
    Column::Generation,
];

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::CompanyName => "Company Name",
            Column::AssignedTo => "Assigned To",
            Column::AccountType => "Account Type",
            Column::ProspectScore => "Prospect Score",
            Column::Website => "Website",
            Column::RevenueEstimate => "Revenue Estimate",
            Column::Employees => "Employees",
            Column::HeadOffice => "Head Office",
            Column::Country => "Country",
            Column::Segmentation => "Segmentation",
            Column::DropNotes => "Drop Notes",
            Column::AccountNotes => "Account Notes",
            Column::Activity => "Activity",
            Column::Generation => "Generation",
        }
    }

    fn value(self, account: &Account) -> String {
        match self {
            Column::CompanyName => account.company_name.clone(),
            Column::AssignedTo => account.assigned_to.clone(),
            Column::AccountType => account.account_type.clone(),
            Column::ProspectScore => account.prospect_score.to_string(),
            Column::Website => account.website.clone(),
            Column::RevenueEstimate => account.revenue_estimate.clone(),
            Column::Employees => account.employees.to_string(),
            Column::HeadOffice => account.head_office.clone(),
            Column::Country => account.country.clone(),
            Column::Segmentation => account.segmentation.clone(),
            Column::DropNotes => account.drop_notes.clone(),
            // Multi-valued fields flatten to one cell.
            Column::AccountNotes => account.account_notes.join("; "),
            Column::Activity => account.activity.to_string(),
            Column::Generation => account.generation.to_string(),
        }
    }
}

/// Render `accounts` as delimited text with the given column set.
///
/// Header row first, then one row per record in the order given. Rows are
/// joined with `\n` and carry no trailing newline.
pub fn to_delimited_text(accounts: &[Account], columns: &[Column]) -> String {
    let mut lines = Vec::with_capacity(accounts.len() + 1);

    let header: Vec<&str> = columns.iter().map(|c| c.header()).collect();
    lines.push(header.join(","));

    for account in accounts {
        let fields: Vec<String> = columns
            .iter()
            .map(|c| quote_field(&c.value(account)))
            .collect();
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

/// Wrap a value in quotes, doubling any embedded quotes.
fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Dated filename for the full filtered-list export.
pub fn export_filename() -> String {
    format!("accounts_export_{}.csv", Local::now().format("%Y-%m-%d"))
}

/// Dated filename for the comparison export.
pub fn comparison_filename() -> String {
    format!("account_comparison_{}.csv", Local::now().format("%Y-%m-%d"))
}
