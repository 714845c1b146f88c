//! Fixed-size pagination envelope shared by every listing.

/// Posts per page on every feed.
pub const PAGE_SIZE: u64 = 10;

/// One ordered slice of a listing plus totals.
///
/// `page` is 1-based. A request past the last page yields an empty `items`
/// vector, not an error.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

/// Number of pages needed for `total_items` at [`PAGE_SIZE`] per page.
pub fn num_pages(total_items: u64) -> u64 {
    total_items.div_ceil(PAGE_SIZE)
}
