use serde::{Deserialize, Serialize};

/// Base URL for the external CRM deep link built from `externalCrmId`.
pub const CRM_ACCOUNT_URL: &str = "https://crm.example.com/lightning/r/Account";

// =============================================================================
// Account record
// =============================================================================

/// One company's profile data — the unit being filtered, sorted, and compared.
///
/// Mirrors the JSON wire format of the bundled dataset (camelCase keys).
/// `accountNotes` accepts either a single string or an array of strings on
/// input and is always a normalized `Vec<String>` in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub company_name: String,
    pub assigned_to: String,
    pub account_type: String,
    pub prospect_score: u8,
    #[serde(default, deserialize_with = "deserialize_notes")]
    pub account_notes: Vec<String>,
    #[serde(default)]
    pub drop_notes: String,
    pub website: String,
    pub revenue_estimate: String,
    pub employees: u64,
    pub head_office: String,
    pub country: String,
    pub segmentation: String,
    #[serde(default)]
    pub activity: u8,
    #[serde(default)]
    pub generation: u8,
    #[serde(default)]
    pub linked_in_url: String,
    #[serde(default)]
    pub external_crm_id: String,
}

impl Account {
    /// Stable identity used for comparison selections. Positional indices into
    /// the filtered sequence go stale when filters change; this key does not.
    pub fn key(&self) -> AccountKey {
        AccountKey {
            company_name: self.company_name.clone(),
            assigned_to: self.assigned_to.clone(),
        }
    }

    /// Deep link into the external CRM, or None when no CRM id is present.
    pub fn crm_url(&self) -> Option<String> {
        if self.external_crm_id.is_empty() {
            None
        } else {
            Some(format!("{}/{}/view", CRM_ACCOUNT_URL, self.external_crm_id))
        }
    }
}

/// Identity key for an account: company name + assigned-to.
///
/// Company names are "unique-ish" in the dataset; the assigned-to field
/// disambiguates the rare duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountKey {
    pub company_name: String,
    pub assigned_to: String,
}

/// Accepts both `"note"` and `["note a", "note b"]` for accountNotes.
fn deserialize_notes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NotesField {
        One(String),
        Many(Vec<String>),
    }

    match NotesField::deserialize(deserializer)? {
        NotesField::One(s) => Ok(vec![s]),
        NotesField::Many(v) => Ok(v),
    }
}

// =============================================================================
// Filter configuration
// =============================================================================

/// User-specified predicates, all optional. Absence of a field means
/// "no constraint on that dimension"; the default config passes everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    /// Free-text search term, matched case-insensitively against company
    /// name, website, account notes, and drop notes.
    #[serde(default)]
    pub search: String,
    /// Exact account type, e.g. "Prospect" or "Customer".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    /// Exact country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Inclusive prospect score bounds. None means 0 / 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<u8>,
    /// Inclusive employee count bounds. None means 0 / unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_employees: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_employees: Option<u64>,
    /// Multi-select facets: empty set means no constraint.
    #[serde(default)]
    pub assigned_to: Vec<String>,
    #[serde(default)]
    pub segmentation: Vec<String>,
}

impl FilterConfig {
    /// True when every dimension is unconstrained.
    pub fn is_default(&self) -> bool {
        *self == FilterConfig::default()
    }
}

// =============================================================================
// Sort state
// =============================================================================

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    CompanyName,
    AssignedTo,
    AccountType,
    ProspectScore,
    RevenueEstimate,
    Employees,
    HeadOffice,
    Country,
    Segmentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Active sort: which column and which way.
///
/// Selecting the same field twice toggles direction; selecting a new field
/// resets to ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    /// Next sort state after the user selects `field`.
    pub fn select(current: Option<SortState>, field: SortField) -> SortState {
        match current {
            Some(s) if s.field == field => SortState {
                field,
                direction: s.direction.flipped(),
            },
            _ => SortState {
                field,
                direction: SortDirection::Asc,
            },
        }
    }
}

// =============================================================================
// Renderer-facing view
// =============================================================================

/// Everything a renderer needs to draw the current table page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub items: Vec<Account>,
    /// 0 when the filtered sequence is empty — render "no items",
    /// not a phantom page 1.
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
    /// Size of the whole filtered sequence, not just this page.
    pub result_count: usize,
}

/// Aggregates for the dashboard overview cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_accounts: usize,
    /// Rounded mean prospect score of the filtered sequence; 0 when empty.
    pub avg_prospect_score: u32,
}
