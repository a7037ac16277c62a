//! Opaque pagination cursors.
//!
//! A cursor is a plain string at the contract boundary; callers only pass it
//! back unchanged or omit it to restart from the first page. Internally an
//! adapter either relays upstream's own continuation token verbatim, or
//! self-encodes a 1-based page number via [`PageCursor`]. The two encodings
//! never meet in a shared type.

/// The stable first/this/next/prev quadruple attached to every sample.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cursor {
    pub this: String,
    /// Present if and only if more pages exist after this one.
    pub next: Option<String>,
    pub prev: Option<String>,
    pub first: String,
}

/// Self-encoded 1-based page number cursor.
///
/// Incoming cursor strings are optimistic hints, not validated input:
/// anything non-numeric or non-positive normalizes to page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u64,
}

impl PageCursor {
    pub const FIRST_PAGE: u64 = 1;

    pub fn parse(cursor: &str) -> Self {
        let page = cursor
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|page| *page >= Self::FIRST_PAGE)
            .unwrap_or(Self::FIRST_PAGE);
        Self { page }
    }

    /// Successor rule for adapters that cannot see upstream's page count: a
    /// full page implies another one may exist.
    pub fn next_when_full(self, item_count: usize, page_size: usize) -> Option<u64> {
        (item_count == page_size).then(|| self.page + 1)
    }

    /// Expand into the cursor quadruple. `next_page` is supplied by the
    /// adapter, which knows whether more data exists.
    pub fn cursor(self, next_page: Option<u64>) -> Cursor {
        Cursor {
            this: self.page.to_string(),
            next: next_page.map(|page| page.to_string()),
            prev: (self.page > Self::FIRST_PAGE).then(|| (self.page - 1).to_string()),
            first: Self::FIRST_PAGE.to_string(),
        }
    }
}
