//! Comparison engine.
//!
//! Maintains the bounded working set of accounts picked for side-by-side
//! comparison and derives everything the comparison view renders: per-metric
//! min/max highlighting, winner flags, and the insight lines.
//!
//! Selections are keyed by stable record identity, not by position in the
//! filtered sequence. Positions silently point at different records after a
//! refilter; identities either resolve or get dropped with a notice.

use serde::Serialize;

use crate::types::{Account, AccountKey};

/// Upper bound on the comparison working set.
pub const MAX_COMPARISONS: usize = 3;

/// A comparison needs at least this many members to be meaningful.
pub const MIN_VIEWABLE: usize = 2;

// =============================================================================
// Selection
// =============================================================================

/// Insertion-ordered set of up to [`MAX_COMPARISONS`] account identities.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSelection {
    keys: Vec<AccountKey>,
}

/// Result of a toggle, so the caller can toast / close the view accordingly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    /// Removed; `still_viewable` is false once fewer than [`MIN_VIEWABLE`]
    /// members remain and the comparison view should close.
    Removed { still_viewable: bool },
    /// Selection already holds the maximum; the toggle was a no-op.
    AtCapacity,
}

impl ComparisonSelection {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &AccountKey) -> bool {
        self.keys.contains(key)
    }

    pub fn at_capacity(&self) -> bool {
        self.keys.len() >= MAX_COMPARISONS
    }

    /// True when enough members are selected to open the comparison view.
    pub fn is_viewable(&self) -> bool {
        self.keys.len() >= MIN_VIEWABLE
    }

    pub fn keys(&self) -> &[AccountKey] {
        &self.keys
    }

    /// Add `key` if absent (and under the limit), remove it if present.
    pub fn toggle(&mut self, key: AccountKey) -> ToggleOutcome {
        if let Some(pos) = self.keys.iter().position(|k| k == &key) {
            self.keys.remove(pos);
            ToggleOutcome::Removed {
                still_viewable: self.is_viewable(),
            }
        } else if self.at_capacity() {
            ToggleOutcome::AtCapacity
        } else {
            self.keys.push(key);
            ToggleOutcome::Added
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Drop identities no longer present in the freshly filtered sequence.
    ///
    /// Returns the dropped keys so the caller can show a notice; the
    /// survivors keep their insertion order.
    pub fn reconcile(&mut self, filtered: &[Account]) -> Vec<AccountKey> {
        let (kept, dropped): (Vec<AccountKey>, Vec<AccountKey>) = self
            .keys
            .drain(..)
            .partition(|key| filtered.iter().any(|a| &a.key() == key));
        self.keys = kept;
        dropped
    }

    /// Resolve the selection against the filtered sequence, insertion order.
    pub fn resolve<'a>(&self, filtered: &'a [Account]) -> Vec<&'a Account> {
        self.keys
            .iter()
            .filter_map(|key| filtered.iter().find(|a| &a.key() == key))
            .collect()
    }
}

// =============================================================================
// Revenue bands
// =============================================================================

/// Numeric midpoint (in $ millions) for a labeled revenue band.
///
/// The band is a display string like "$50 mil-$100 mil"; comparisons need a
/// number. Unrecognized bands map to 0.
pub fn revenue_numeric(band: &str) -> f64 {
    if band.contains("$10 mil") {
        17.5
    } else if band.contains("$25 mil") {
        37.5
    } else if band.contains("$50 mil") {
        75.0
    } else if band.contains("$100 mil") {
        175.0
    } else if band.contains("$250 mil") {
        375.0
    } else {
        0.0
    }
}

// =============================================================================
// Derived view
// =============================================================================

/// How a metric value sits relative to the other selected accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    Highest,
    Lowest,
    None,
}

/// One row in a comparison card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRow {
    pub label: &'static str,
    pub value: String,
    pub highlight: Highlight,
    /// Fill percentage for the metric bar; None for non-comparable rows.
    pub bar_percentage: Option<f64>,
}

/// One card in the comparison grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonCard {
    pub account: Account,
    /// Every account sharing the max prospect score is flagged; a score tie
    /// produces multiple winner badges on purpose.
    pub winner: bool,
    pub metrics: Vec<MetricRow>,
}

/// The full derived comparison view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonView {
    pub cards: Vec<ComparisonCard>,
    pub insights: Vec<String>,
}

/// Build the comparison view for the resolved selection.
///
/// Pure function of `selected`; identical input always yields identical
/// cards and insight text.
pub fn build_view(selected: &[Account]) -> ComparisonView {
    let cards = selected
        .iter()
        .map(|account| ComparisonCard {
            account: account.clone(),
            winner: is_winner(account, selected),
            metrics: metric_rows(account, selected),
        })
        .collect();

    ComparisonView {
        cards,
        insights: generate_insights(selected),
    }
}

/// Winner = highest prospect score among the selected accounts.
pub fn is_winner(account: &Account, selected: &[Account]) -> bool {
    let max_score = selected.iter().map(|a| a.prospect_score).max().unwrap_or(0);
    account.prospect_score == max_score
}

/// Metric rows for one card, highlighted relative to the selection.
pub fn metric_rows(account: &Account, selected: &[Account]) -> Vec<MetricRow> {
    let max_score = selected.iter().map(|a| a.prospect_score).max().unwrap_or(0);
    let min_score = selected.iter().map(|a| a.prospect_score).min().unwrap_or(0);
    let max_employees = selected.iter().map(|a| a.employees).max().unwrap_or(0);
    let min_employees = selected.iter().map(|a| a.employees).min().unwrap_or(0);
    let revenues: Vec<f64> = selected
        .iter()
        .map(|a| revenue_numeric(&a.revenue_estimate))
        .collect();
    let max_revenue = revenues.iter().cloned().fold(f64::MIN, f64::max);
    let min_revenue = revenues.iter().cloned().fold(f64::MAX, f64::min);
    let revenue = revenue_numeric(&account.revenue_estimate);

    vec![
        MetricRow {
            label: "Prospect Score",
            value: account.prospect_score.to_string(),
            highlight: highlight_for(
                account.prospect_score == max_score,
                account.prospect_score == min_score,
            ),
            bar_percentage: Some(bar_percentage(account.prospect_score as f64, max_score as f64)),
        },
        MetricRow {
            label: "Revenue",
            value: account.revenue_estimate.clone(),
            highlight: highlight_for(revenue == max_revenue, revenue == min_revenue),
            bar_percentage: Some(bar_percentage(revenue, max_revenue)),
        },
        MetricRow {
            label: "Employees",
            value: account.employees.to_string(),
            highlight: highlight_for(
                account.employees == max_employees,
                account.employees == min_employees,
            ),
            bar_percentage: Some(bar_percentage(account.employees as f64, max_employees as f64)),
        },
        MetricRow {
            label: "Assigned To",
            value: account.assigned_to.clone(),
            highlight: Highlight::None,
            bar_percentage: None,
        },
        MetricRow {
            label: "Activity Level",
            value: format!("{}/10", account.activity),
            highlight: Highlight::None,
            bar_percentage: None,
        },
        MetricRow {
            label: "Head Office",
            value: account.head_office.clone(),
            highlight: Highlight::None,
            bar_percentage: None,
        },
    ]
}

fn highlight_for(is_max: bool, is_min: bool) -> Highlight {
    if is_max {
        Highlight::Highest
    } else if is_min {
        Highlight::Lowest
    } else {
        Highlight::None
    }
}

fn bar_percentage(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        value / max * 100.0
    }
}

/// Three deterministic findings plus a recommendation line.
///
/// Ties resolve to the last account in selection order.
pub fn generate_insights(selected: &[Account]) -> Vec<String> {
    let Some(first) = selected.first() else {
        return Vec::new();
    };

    let highest = selected.iter().skip(1).fold(first, |best, a| {
        if a.prospect_score >= best.prospect_score {
            a
        } else {
            best
        }
    });
    let largest = selected.iter().skip(1).fold(first, |best, a| {
        if a.employees >= best.employees {
            a
        } else {
            best
        }
    });
    let richest = selected.iter().skip(1).fold(first, |best, a| {
        if revenue_numeric(&a.revenue_estimate) >= revenue_numeric(&best.revenue_estimate) {
            a
        } else {
            best
        }
    });

    let mut insights = vec![
        format!(
            "{} has the highest prospect score ({})",
            highest.company_name, highest.prospect_score
        ),
        format!(
            "{} is the largest company ({} employees)",
            largest.company_name, largest.employees
        ),
        format!(
            "{} offers the largest revenue opportunity ({})",
            richest.company_name, richest.revenue_estimate
        ),
    ];

    if highest.company_name == richest.company_name {
        insights.push(format!(
            "Recommendation: focus on {} - highest score and revenue potential",
            highest.company_name
        ));
    } else {
        insights.push(format!(
            "Recommendation: consider {} for quick wins, {} for long-term value",
            highest.company_name, richest.company_name
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str, score: u8, employees: u64, band: &str) -> Account {
        Account {
            company_name: name.to_string(),
            assigned_to: "Sarah Chen".to_string(),
            account_type: "Prospect".to_string(),
            prospect_score: score,
            account_notes: vec![],
            drop_notes: String::new(),
            website: String::new(),
            revenue_estimate: band.to_string(),
            employees,
            head_office: "Calgary".to_string(),
            country: "Canada".to_string(),
            segmentation: "Enterprise".to_string(),
            activity: 5,
            generation: 5,
            linked_in_url: String::new(),
            external_crm_id: String::new(),
        }
    }

    #[test]
    fn test_toggle_respects_capacity() {
        let a = account("A", 10, 1, "$10 mil-$25 mil");
        let b = account("B", 20, 2, "$10 mil-$25 mil");
        let c = account("C", 30, 3, "$10 mil-$25 mil");
        let d = account("D", 40, 4, "$10 mil-$25 mil");

        let mut selection = ComparisonSelection::default();
        assert_eq!(selection.toggle(a.key()), ToggleOutcome::Added);
        assert_eq!(selection.toggle(b.key()), ToggleOutcome::Added);
        assert_eq!(selection.toggle(c.key()), ToggleOutcome::Added);

        // Fourth selection is a silent no-op, not an error.
        assert_eq!(selection.toggle(d.key()), ToggleOutcome::AtCapacity);
        assert_eq!(selection.len(), 3);
        assert!(!selection.contains(&d.key()));
    }

    #[test]
    fn test_removal_below_two_signals_close() {
        let a = account("A", 10, 1, "$10 mil-$25 mil");
        let b = account("B", 20, 2, "$10 mil-$25 mil");

        let mut selection = ComparisonSelection::default();
        selection.toggle(a.key());
        selection.toggle(b.key());
        assert!(selection.is_viewable());

        let outcome = selection.toggle(b.key());
        assert_eq!(
            outcome,
            ToggleOutcome::Removed {
                still_viewable: false
            }
        );
        assert!(!selection.is_viewable());
    }

    #[test]
    fn test_reconcile_drops_stale_identities() {
        let a = account("A", 10, 1, "$10 mil-$25 mil");
        let b = account("B", 20, 2, "$10 mil-$25 mil");
        let c = account("C", 30, 3, "$10 mil-$25 mil");

        let mut selection = ComparisonSelection::default();
        selection.toggle(a.key());
        selection.toggle(b.key());
        selection.toggle(c.key());

        // New filtered sequence no longer contains B.
        let filtered = vec![a.clone(), c.clone()];
        let dropped = selection.reconcile(&filtered);
        assert_eq!(dropped, vec![b.key()]);
        assert_eq!(selection.keys(), &[a.key(), c.key()]);

        let resolved = selection.resolve(&filtered);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].company_name, "A");
    }

    #[test]
    fn test_revenue_band_mapping() {
        assert_eq!(revenue_numeric("$10 mil-$25 mil"), 17.5);
        assert_eq!(revenue_numeric("$100 mil range"), 175.0);
        assert_eq!(revenue_numeric("$250 mil+"), 375.0);
        assert_eq!(revenue_numeric("Unknown"), 0.0);
        assert_eq!(revenue_numeric(""), 0.0);
    }

    #[test]
    fn test_metric_highlighting_marks_all_ties() {
        let selected = vec![
            account("A", 90, 100, "$50 mil-$100 mil"),
            account("B", 90, 500, "$10 mil-$25 mil"),
            account("C", 40, 500, "$250 mil+"),
        ];

        let rows_a = metric_rows(&selected[0], &selected);
        let rows_b = metric_rows(&selected[1], &selected);
        let rows_c = metric_rows(&selected[2], &selected);

        // Both A and B share the top score.
        assert_eq!(rows_a[0].highlight, Highlight::Highest);
        assert_eq!(rows_b[0].highlight, Highlight::Highest);
        assert_eq!(rows_c[0].highlight, Highlight::Lowest);

        // B and C share the employee max; A is the min.
        assert_eq!(rows_a[2].highlight, Highlight::Lowest);
        assert_eq!(rows_b[2].highlight, Highlight::Highest);
        assert_eq!(rows_c[2].highlight, Highlight::Highest);
    }

    #[test]
    fn test_winner_tie_flags_everyone_at_max() {
        let selected = vec![
            account("A", 90, 1, "$10 mil-$25 mil"),
            account("B", 90, 2, "$10 mil-$25 mil"),
            account("C", 10, 3, "$10 mil-$25 mil"),
        ];
        let view = build_view(&selected);
        assert!(view.cards[0].winner);
        assert!(view.cards[1].winner);
        assert!(!view.cards[2].winner);
    }

    #[test]
    fn test_insights_same_leader() {
        let selected = vec![
            account("Alpha", 95, 5000, "$250 mil+"),
            account("Beta", 60, 100, "$10 mil-$25 mil"),
        ];
        let insights = generate_insights(&selected);
        assert_eq!(insights[0], "Alpha has the highest prospect score (95)");
        assert_eq!(insights[1], "Alpha is the largest company (5000 employees)");
        assert_eq!(
            insights[2],
            "Alpha offers the largest revenue opportunity ($250 mil+)"
        );
        assert_eq!(
            insights[3],
            "Recommendation: focus on Alpha - highest score and revenue potential"
        );
    }

    #[test]
    fn test_insights_split_leaders() {
        let selected = vec![
            account("Quick", 95, 50, "$10 mil-$25 mil"),
            account("Deep", 60, 9000, "$250 mil+"),
        ];
        let insights = generate_insights(&selected);
        assert_eq!(
            insights[3],
            "Recommendation: consider Quick for quick wins, Deep for long-term value"
        );
    }

    #[test]
    fn test_insight_ties_resolve_to_last_selected() {
        let selected = vec![
            account("First", 80, 100, "$50 mil-$100 mil"),
            account("Second", 80, 100, "$50 mil-$100 mil"),
        ];
        let insights = generate_insights(&selected);
        assert!(insights[0].starts_with("Second"));
        assert!(insights[1].starts_with("Second"));
        assert!(insights[2].starts_with("Second"));

        // A strictly higher value earlier in the selection still wins.
        let mixed = vec![
            account("Leader", 90, 100, "$50 mil-$100 mil"),
            account("Trailer", 80, 100, "$50 mil-$100 mil"),
        ];
        let insights = generate_insights(&mixed);
        assert!(insights[0].starts_with("Leader"));
    }

    #[test]
    fn test_bar_percentage_guards_zero_max() {
        let selected = vec![account("A", 0, 0, "Unknown"), account("B", 0, 0, "n/a")];
        let rows = metric_rows(&selected[0], &selected);
        for row in rows.iter().filter(|r| r.bar_percentage.is_some()) {
            assert_eq!(row.bar_percentage, Some(0.0));
        }
    }
}
