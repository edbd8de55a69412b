//! Page windows over identifier lists
//!
//! A window is the half-open range `[(page-1)*limit, page*limit)` clamped to
//! the list. A window starting past the end is empty; the page number is not
//! clamped back into range.

use std::ops::Range;

/// Page number (1-indexed) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub limit: usize,
}

impl PageWindow {
    /// Build a window; zero values are raised to 1
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Window from raw query values
    ///
    /// Missing, non-numeric and non-positive values fall back to page 1 and
    /// `default_limit`; `limit` is capped at `max_limit`.
    pub fn from_query(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: usize,
        max_limit: usize,
    ) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let limit = parse_positive(limit)
            .unwrap_or(default_limit)
            .min(max_limit);
        Self::new(page, limit)
    }

    /// Index range of this window within a list of `len` items
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = (self.page - 1).saturating_mul(self.limit).min(len);
        let end = self.page.saturating_mul(self.limit).min(len);
        start..end
    }

    /// The slice of `items` covered by this window
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    /// True when a later page would contain items
    pub fn has_next(&self, len: usize) -> bool {
        self.page.saturating_mul(self.limit) < len
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Total number of pages for `len` items
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.limit)
    }
}

/// Leading decimal digits of `value`, if they form a positive number
///
/// Trailing garbage is ignored (`"2abc"` is 2, `"3.5"` is 3).
fn parse_positive(value: Option<&str>) -> Option<usize> {
    let text = value?.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());

    text[..end].parse::<usize>().ok().filter(|v| *v > 0)
}
