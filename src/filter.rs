//! Filter engine.
//!
//! Pure predicate evaluation over the source collection. All predicates are
//! AND-combined and the output preserves source order, so an all-default
//! configuration returns the full collection unchanged.

use crate::types::{Account, FilterConfig};

/// Default upper bound for the prospect score filter.
pub const MAX_PROSPECT_SCORE: u8 = 100;

/// Apply `config` to `accounts`, keeping records that pass every predicate.
pub fn filter_accounts(accounts: &[Account], config: &FilterConfig) -> Vec<Account> {
    let search = config.search.trim().to_lowercase();

    accounts
        .iter()
        .filter(|account| matches(account, config, &search))
        .cloned()
        .collect()
}

fn matches(account: &Account, config: &FilterConfig, search: &str) -> bool {
    if !search.is_empty() && !search_haystack(account).contains(search) {
        return false;
    }

    if let Some(account_type) = &config.account_type {
        if &account.account_type != account_type {
            return false;
        }
    }

    if !config.assigned_to.is_empty() && !config.assigned_to.contains(&account.assigned_to) {
        return false;
    }

    if !config.segmentation.is_empty() && !config.segmentation.contains(&account.segmentation) {
        return false;
    }

    if let Some(country) = &config.country {
        if &account.country != country {
            return false;
        }
    }

    let min_score = config.min_score.unwrap_or(0);
    let max_score = config.max_score.unwrap_or(MAX_PROSPECT_SCORE);
    if account.prospect_score < min_score || account.prospect_score > max_score {
        return false;
    }

    let min_employees = config.min_employees.unwrap_or(0);
    if account.employees < min_employees {
        return false;
    }
    if let Some(max_employees) = config.max_employees {
        if account.employees > max_employees {
            return false;
        }
    }

    true
}

/// Space-joined lowercase text the search term is matched against:
/// company name, website, account notes, drop notes.
fn search_haystack(account: &Account) -> String {
    format!(
        "{} {} {} {}",
        account.company_name,
        account.website,
        account.account_notes.join(" "),
        account.drop_notes
    )
    .to_lowercase()
}

/// Parse a raw numeric filter input.
///
/// Empty or malformed input means "no bound", never zero and never an error —
/// typing "abc" into the max-employees box must not hide every account.
pub fn parse_numeric_input(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<u64>().ok()
}

/// Score-bound variant of [`parse_numeric_input`], clamped to 0..=100.
pub fn parse_score_input(input: &str) -> Option<u8> {
    parse_numeric_input(input).map(|v| v.min(MAX_PROSPECT_SCORE as u64) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AccountStore;

    fn accounts() -> Vec<Account> {
        AccountStore::bundled().unwrap().accounts().to_vec()
    }

    #[test]
    fn test_default_config_returns_everything_in_order() {
        let source = accounts();
        let filtered = filter_accounts(&source, &FilterConfig::default());
        assert_eq!(filtered, source);
    }

    #[test]
    fn test_filtered_is_order_preserving_subset() {
        let source = accounts();
        let config = FilterConfig {
            account_type: Some("Prospect".to_string()),
            ..Default::default()
        };
        let filtered = filter_accounts(&source, &config);
        assert!(filtered.len() < source.len());

        // Retained records keep their relative source order.
        let mut source_iter = source.iter();
        for kept in &filtered {
            assert!(source_iter.any(|a| a == kept));
        }
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let source = accounts();
        let config = FilterConfig {
            search: "  NORTHERN grid  ".to_string(),
            ..Default::default()
        };
        let filtered = filter_accounts(&source, &config);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].company_name, "Northern Grid Analytics");
    }

    #[test]
    fn test_search_covers_notes_and_drop_notes() {
        let source = accounts();

        let by_note = filter_accounts(
            &source,
            &FilterConfig {
                search: "champion identified".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(by_note.len(), 1);
        assert_eq!(by_note[0].company_name, "Solstice Battery Co");

        let by_drop_note = filter_accounts(
            &source,
            &FilterConfig {
                search: "budget freeze".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(by_drop_note.len(), 1);
        assert_eq!(by_drop_note[0].company_name, "Prairie Wind Partners");
    }

    #[test]
    fn test_multi_select_facets() {
        let source = accounts();
        let config = FilterConfig {
            assigned_to: vec!["Sarah Chen".to_string(), "Tom Albrecht".to_string()],
            ..Default::default()
        };
        let filtered = filter_accounts(&source, &config);
        assert!(!filtered.is_empty());
        assert!(filtered
            .iter()
            .all(|a| a.assigned_to == "Sarah Chen" || a.assigned_to == "Tom Albrecht"));

        // Empty selection set means no constraint.
        let unconstrained = filter_accounts(
            &source,
            &FilterConfig {
                assigned_to: vec![],
                ..Default::default()
            },
        );
        assert_eq!(unconstrained.len(), source.len());
    }

    #[test]
    fn test_score_and_employee_ranges_are_inclusive() {
        let source = accounts();
        let config = FilterConfig {
            min_score: Some(72),
            max_score: Some(88),
            ..Default::default()
        };
        let filtered = filter_accounts(&source, &config);
        assert!(filtered
            .iter()
            .all(|a| (72..=88).contains(&a.prospect_score)));
        assert!(filtered.iter().any(|a| a.prospect_score == 72));
        assert!(filtered.iter().any(|a| a.prospect_score == 88));

        let config = FilterConfig {
            min_employees: Some(1000),
            ..Default::default()
        };
        let filtered = filter_accounts(&source, &config);
        assert!(filtered.iter().all(|a| a.employees >= 1000));
    }

    #[test]
    fn test_country_and_type_combined() {
        let source = accounts();
        let config = FilterConfig {
            country: Some("Canada".to_string()),
            account_type: Some("Prospect".to_string()),
            ..Default::default()
        };
        let filtered = filter_accounts(&source, &config);
        assert!(!filtered.is_empty());
        assert!(filtered
            .iter()
            .all(|a| a.country == "Canada" && a.account_type == "Prospect"));
    }

    #[test]
    fn test_numeric_input_degrades_to_no_bound() {
        assert_eq!(parse_numeric_input(""), None);
        assert_eq!(parse_numeric_input("   "), None);
        assert_eq!(parse_numeric_input("abc"), None);
        assert_eq!(parse_numeric_input("-5"), None);
        assert_eq!(parse_numeric_input("12.5"), None);
        assert_eq!(parse_numeric_input(" 250 "), Some(250));

        assert_eq!(parse_score_input("oops"), None);
        assert_eq!(parse_score_input("85"), Some(85));
        assert_eq!(parse_score_input("400"), Some(100));
    }
}
