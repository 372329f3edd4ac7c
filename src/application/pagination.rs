//! Page-number pagination over ordered sequences.

use serde::Serialize;

/// One bounded slice of an ordered sequence, identified by a 1-based page
/// number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedPage<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: usize,
}

impl<T> FeedPage<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Split `items` into fixed-size pages and return the requested one.
///
/// `requested_page` comes from untrusted request input and is clamped to
/// `[1, total_pages]` — out-of-range values return the nearest valid page,
/// never an error. An empty sequence yields a single empty page.
pub fn paginate<T>(items: Vec<T>, page_size: u32, requested_page: u32) -> FeedPage<T> {
    debug_assert!(page_size >= 1, "page_size must be at least 1");
    let page_size = page_size.max(1) as usize;
    let total_items = items.len();
    let total_pages = u32::try_from(total_items.div_ceil(page_size)).unwrap_or(u32::MAX).max(1);
    let page = requested_page.clamp(1, total_pages);
    let start = (page as usize - 1) * page_size;
    let items: Vec<T> = items.into_iter().skip(start).take(page_size).collect();

    FeedPage {
        items,
        page,
        total_pages,
        total_items,
    }
}
