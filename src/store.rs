//! Account record store.
//!
//! Holds the immutable source collection, loaded once at startup from the
//! bundled dataset or an external JSON file. All derived state (filtered,
//! sorted, paginated) lives in the controller and is recomputed from this
//! collection; the store itself is read-only after load.
//!
//! A load failure is not fatal: the store initializes to an empty sequence
//! and the renderer shows a "no data" state instead of crashing.

use std::path::Path;

use crate::error::DashboardError;
use crate::types::Account;

/// JSON dataset compiled into the binary. Used when no external file is given.
const BUNDLED_ACCOUNTS: &str = include_str!("../data/accounts.json");

/// Immutable source collection of account records.
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    /// Store over an already-built collection (tests, embedding callers).
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// Parse a store from a JSON array of account records.
    pub fn from_json_str(json: &str) -> Result<Self, DashboardError> {
        let accounts: Vec<Account> =
            serde_json::from_str(json).map_err(|e| DashboardError::DataParse(e.to_string()))?;
        Ok(Self { accounts })
    }

    /// Load the dataset bundled into the binary.
    pub fn bundled() -> Result<Self, DashboardError> {
        Self::from_json_str(BUNDLED_ACCOUNTS)
    }

    /// Load a store from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self, DashboardError> {
        if !path.exists() {
            return Err(DashboardError::DataFileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| DashboardError::DataRead(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    /// Load from disk, degrading to an empty store on any failure.
    ///
    /// Returns the error alongside the store so the caller can surface a
    /// "no data" notice once without losing the dashboard entirely.
    pub fn load_or_empty(path: &Path) -> (Self, Option<DashboardError>) {
        match Self::from_path(path) {
            Ok(store) => {
                log::info!("Loaded {} accounts from {}", store.len(), path.display());
                (store, None)
            }
            Err(e) => {
                log::warn!("Account data unavailable ({e}); starting with empty store");
                (Self::default(), Some(e))
            }
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Look up a record by identity key.
    pub fn get(&self, key: &crate::types::AccountKey) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.key() == key)
    }

    // -------------------------------------------------------------------------
    // Facet values for filter dropdowns
    // -------------------------------------------------------------------------

    /// Sorted unique countries across the collection.
    pub fn countries(&self) -> Vec<String> {
        self.facet(|a| &a.country)
    }

    /// Sorted unique account types.
    pub fn account_types(&self) -> Vec<String> {
        self.facet(|a| &a.account_type)
    }

    /// Sorted unique team member names.
    pub fn assigned_to_values(&self) -> Vec<String> {
        self.facet(|a| &a.assigned_to)
    }

    /// Sorted unique segmentation labels.
    pub fn segmentation_values(&self) -> Vec<String> {
        self.facet(|a| &a.segmentation)
    }

    fn facet<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&Account) -> &String,
    {
        let mut values: Vec<String> = self.accounts.iter().map(|a| field(a).clone()).collect();
        values.sort();
        values.dedup();
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dataset_parses() {
        let store = AccountStore::bundled().unwrap();
        assert!(!store.is_empty());
        // Every bundled record carries the fields active filters rely on.
        for account in store.accounts() {
            assert!(!account.company_name.is_empty());
            assert!(!account.country.is_empty());
            assert!(account.prospect_score <= 100);
        }
    }

    #[test]
    fn test_facets_sorted_and_deduped() {
        let store = AccountStore::bundled().unwrap();
        let countries = store.countries();
        let mut sorted = countries.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(countries, sorted);
        assert!(countries.contains(&"Canada".to_string()));
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let (store, err) = AccountStore::load_or_empty(Path::new("/nonexistent/accounts.json"));
        assert!(store.is_empty());
        assert!(matches!(err, Some(DashboardError::DataFileNotFound(_))));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = AccountStore::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, DashboardError::DataParse(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_get_by_key() {
        let store = AccountStore::bundled().unwrap();
        let first = store.accounts()[0].clone();
        assert_eq!(store.get(&first.key()), Some(&first));
    }
}
