//! Pagination engine.
//!
//! Slices a sequence into fixed-size pages and computes the page-indicator
//! metadata the renderer draws: total pages, the clamped current page, the
//! windowed page-number row with ellipses, and the "Showing X-Y of Z" label.

use crate::types::Account;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Default number of accounts per page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// One computed page of the filtered sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Account>,
    /// 0 for an empty sequence; never a phantom page 1.
    pub total_pages: usize,
    /// The requested page clamped into `1..=max(1, total_pages)`.
    pub current_page: usize,
}

/// Entry in the windowed page-number row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Slice out the requested page, clamping out-of-range requests.
pub fn paginate(accounts: &[Account], page_size: usize, requested_page: usize) -> Page {
    let page_size = page_size.max(1);
    let total_pages = accounts.len().div_ceil(page_size);
    let current_page = requested_page.clamp(1, total_pages.max(1));

    let start = (current_page - 1) * page_size;
    let items = if start >= accounts.len() {
        Vec::new()
    } else {
        let end = (start + page_size).min(accounts.len());
        accounts[start..end].to_vec()
    };

    Page {
        items,
        total_pages,
        current_page,
    }
}

/// Which page numbers to display for `total` pages with `current` active.
///
/// Seven or fewer pages show in full. Beyond that the first and last page are
/// always visible, with an ellipsis on whichever side the window is away
/// from: near the start show 1-5, near the end show the last five, otherwise
/// show current±1 between two ellipses.
pub fn page_numbers(total: usize, current: usize) -> Vec<PageMarker> {
    use PageMarker::{Ellipsis, Page};

    let mut markers = Vec::new();

    if total <= 7 {
        for page in 1..=total {
            markers.push(Page(page));
        }
        return markers;
    }

    markers.push(Page(1));

    if current <= 4 {
        for page in 2..=5 {
            markers.push(Page(page));
        }
        markers.push(Ellipsis);
        markers.push(Page(total));
    } else if current >= total - 3 {
        markers.push(Ellipsis);
        for page in (total - 4)..=total {
            markers.push(Page(page));
        }
    } else {
        markers.push(Ellipsis);
        for page in (current - 1)..=(current + 1) {
            markers.push(Page(page));
        }
        markers.push(Ellipsis);
        markers.push(Page(total));
    }

    markers
}

/// Human-readable range label: `Showing 26-50 of 112 accounts`.
pub fn range_label(total_items: usize, page_size: usize, current_page: usize) -> String {
    if total_items == 0 {
        return "No accounts to display".to_string();
    }
    let start = (current_page - 1) * page_size + 1;
    let end = (current_page * page_size).min(total_items);
    format!("Showing {start}-{end} of {total_items} accounts")
}
