//! Account dashboard core.
//!
//! Everything a business-account dashboard needs behind the rendering layer:
//! an immutable record store, pure filter/sort/pagination engines, a bounded
//! comparison working set with derived insights, delimited-text export, a
//! session gate, preference persistence, and input debouncing. No rendering,
//! no network; a UI shell drives the [`controller::DashboardController`] and
//! draws the values it returns.

pub mod comparison;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod export;
pub mod filter;
pub mod pagination;
pub mod prefs;
pub mod session;
pub mod sort;
pub mod store;
pub mod types;

pub use comparison::{ComparisonSelection, ComparisonView, ToggleOutcome, MAX_COMPARISONS};
pub use controller::DashboardController;
pub use debounce::Debouncer;
pub use error::DashboardError;
pub use filter::filter_accounts;
pub use pagination::{PageMarker, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use prefs::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Theme};
pub use session::SessionGate;
pub use sort::sort_accounts;
pub use store::AccountStore;
pub use types::{
    Account, AccountKey, FilterConfig, OverviewStats, PageView, SortDirection, SortField,
    SortState,
};
