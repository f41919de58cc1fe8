//! Dashboard controller.
//!
//! Thin stateful shell over the pure engines. Owns the current filter
//! configuration, sort state, pagination cursor, and comparison selection,
//! and recomputes the derived filtered sequence whenever an input changes.
//! Everything it hands out is a value the renderer can draw directly.
//!
//! State transitions follow the rules the view depends on: changing filters
//! or page size resets to page 1, re-sorting keeps the current page, and
//! filter changes reconcile the comparison selection and report what fell
//! out of view.

use crate::comparison::{self, ComparisonSelection, ComparisonView, ToggleOutcome};
use crate::error::DashboardError;
use crate::export::{self, COMPARISON_COLUMNS, EXPORT_COLUMNS};
use crate::filter::{self, parse_numeric_input, parse_score_input};
use crate::pagination::{self, PageMarker, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use crate::prefs::{PreferenceStore, PAGE_SIZE_KEY};
use crate::session::SessionGate;
use crate::sort::sort_accounts;
use crate::store::AccountStore;
use crate::types::{Account, AccountKey, FilterConfig, OverviewStats, PageView, SortField, SortState};

#[derive(Debug)]
pub struct DashboardController {
    store: AccountStore,
    config: FilterConfig,
    sort: Option<SortState>,
    /// Filtered (and sorted) sequence; recomputed from the store on change.
    filtered: Vec<Account>,
    current_page: usize,
    page_size: usize,
    selection: ComparisonSelection,
}

impl DashboardController {
    /// Build a controller over `store`. Requires an unlocked session.
    pub fn new(gate: &SessionGate, store: AccountStore) -> Result<Self, DashboardError> {
        if !gate.is_unlocked() {
            return Err(DashboardError::Locked);
        }
        let filtered = store.accounts().to_vec();
        Ok(Self {
            store,
            config: FilterConfig::default(),
            sort: None,
            filtered,
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            selection: ComparisonSelection::default(),
        })
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Replace the whole filter configuration.
    pub fn set_config(&mut self, config: FilterConfig) -> Vec<AccountKey> {
        self.config = config;
        self.refresh()
    }

    /// Mutate the configuration in place, then recompute.
    pub fn update_config<F>(&mut self, mutate: F) -> Vec<AccountKey>
    where
        F: FnOnce(&mut FilterConfig),
    {
        mutate(&mut self.config);
        self.refresh()
    }

    pub fn set_search(&mut self, term: impl Into<String>) -> Vec<AccountKey> {
        self.config.search = term.into();
        self.refresh()
    }

    /// Set the score bounds from raw text input; malformed text clears the
    /// corresponding bound rather than erroring.
    pub fn set_score_bounds_input(&mut self, min: &str, max: &str) -> Vec<AccountKey> {
        self.config.min_score = parse_score_input(min);
        self.config.max_score = parse_score_input(max);
        self.refresh()
    }

    /// Raw-text counterpart for the employee bounds.
    pub fn set_employee_bounds_input(&mut self, min: &str, max: &str) -> Vec<AccountKey> {
        self.config.min_employees = parse_numeric_input(min);
        self.config.max_employees = parse_numeric_input(max);
        self.refresh()
    }

    /// Reset every filter dimension, keeping sort and page size.
    pub fn clear_filters(&mut self) -> Vec<AccountKey> {
        self.config = FilterConfig::default();
        self.refresh()
    }

    /// Re-derive the filtered sequence after a config change.
    ///
    /// Resets to page 1 and reconciles the comparison selection, returning
    /// the identities that dropped out of view.
    fn refresh(&mut self) -> Vec<AccountKey> {
        self.filtered = filter::filter_accounts(self.store.accounts(), &self.config);
        if let Some(sort) = self.sort {
            sort_accounts(&mut self.filtered, sort);
        }
        self.current_page = 1;
        let dropped = self.selection.reconcile(&self.filtered);
        if !dropped.is_empty() {
            log::info!(
                "{} comparison selection(s) no longer match the active filters",
                dropped.len()
            );
        }
        dropped
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    /// Select a sort column: same column toggles direction, a new column
    /// starts ascending. The current page is kept.
    pub fn sort_by(&mut self, field: SortField) {
        let next = SortState::select(self.sort, field);
        self.sort = Some(next);
        sort_accounts(&mut self.filtered, next);
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Jump to a page; out-of-range requests clamp.
    pub fn go_to_page(&mut self, page: usize) {
        let total = self.total_pages();
        self.current_page = page.clamp(1, total.max(1));
    }

    /// Change the page size and reset to page 1. Sizes outside
    /// [`PAGE_SIZE_OPTIONS`] are ignored.
    pub fn set_page_size(&mut self, size: usize) {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            log::warn!("Ignoring unsupported page size {size}");
            return;
        }
        self.page_size = size;
        self.current_page = 1;
    }

    /// Restore the persisted page size, if any.
    pub fn restore_page_size(&mut self, prefs: &dyn PreferenceStore) {
        if let Some(size) = prefs
            .get(PAGE_SIZE_KEY)
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
        {
            self.set_page_size(size);
        }
    }

    /// Persist the current page size, logging on failure.
    pub fn persist_page_size(&self, prefs: &mut dyn PreferenceStore) {
        if let Err(e) = prefs.set(PAGE_SIZE_KEY, serde_json::json!(self.page_size)) {
            log::warn!("Failed to persist page size preference: {e}");
        }
    }

    fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size.max(1))
    }

    /// The current page of the filtered sequence, ready to render.
    pub fn page(&self) -> PageView {
        let page = pagination::paginate(&self.filtered, self.page_size, self.current_page);
        PageView {
            items: page.items,
            total_pages: page.total_pages,
            current_page: page.current_page,
            page_size: self.page_size,
            result_count: self.filtered.len(),
        }
    }

    /// Windowed page-number row for the pagination bar.
    pub fn page_markers(&self) -> Vec<PageMarker> {
        pagination::page_numbers(self.total_pages(), self.current_page)
    }

    /// "Showing X-Y of Z accounts" label for the current page.
    pub fn range_label(&self) -> String {
        let page = pagination::paginate(&self.filtered, self.page_size, self.current_page);
        pagination::range_label(self.filtered.len(), self.page_size, page.current_page)
    }

    // -------------------------------------------------------------------------
    // Overview
    // -------------------------------------------------------------------------

    /// Aggregates over the filtered sequence for the overview cards.
    pub fn overview(&self) -> OverviewStats {
        let total = self.filtered.len();
        let avg = if total == 0 {
            0
        } else {
            let sum: u64 = self.filtered.iter().map(|a| a.prospect_score as u64).sum();
            (sum as f64 / total as f64).round() as u32
        };
        OverviewStats {
            total_accounts: total,
            avg_prospect_score: avg,
        }
    }

    pub fn result_count(&self) -> usize {
        self.filtered.len()
    }

    // -------------------------------------------------------------------------
    // Comparison
    // -------------------------------------------------------------------------

    pub fn selection(&self) -> &ComparisonSelection {
        &self.selection
    }

    /// Toggle an account in and out of the comparison selection.
    pub fn toggle_comparison(&mut self, key: AccountKey) -> ToggleOutcome {
        self.selection.toggle(key)
    }

    /// The derived comparison view, or None when fewer than two accounts
    /// are selected.
    pub fn comparison_view(&self) -> Option<ComparisonView> {
        if !self.selection.is_viewable() {
            return None;
        }
        let selected: Vec<Account> = self
            .selection
            .resolve(&self.filtered)
            .into_iter()
            .cloned()
            .collect();
        Some(comparison::build_view(&selected))
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Delimited-text export of the whole filtered sequence (all pages).
    pub fn export_csv(&self) -> String {
        export::to_delimited_text(&self.filtered, &EXPORT_COLUMNS)
    }

    /// Delimited-text export of the comparison selection, or None when the
    /// comparison is not viewable.
    pub fn export_comparison_csv(&self) -> Option<String> {
        if !self.selection.is_viewable() {
            return None;
        }
        let selected: Vec<Account> = self
            .selection
            .resolve(&self.filtered)
            .into_iter()
            .cloned()
            .collect();
        Some(export::to_delimited_text(&selected, &COMPARISON_COLUMNS))
    }

    // -------------------------------------------------------------------------
    // Facets
    // -------------------------------------------------------------------------

    pub fn store(&self) -> &AccountStore {
        &self.store
    }
}
