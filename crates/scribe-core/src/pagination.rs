//! Pagination helper for listing endpoints.
//!
//! Listings fetch an ordered collection and hand it to [`paginate`], which
//! returns the slice for the requested page. Out-of-range page numbers are
//! not an error; they yield an empty page.

/// Fixed page size for all listings.
pub const PAGE_SIZE: u64 = 10;

/// One page of an ordered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number this slice corresponds to.
    pub number: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Resolve the raw `page` query parameter to a 1-based page number.
///
/// Absent, unparsable, or non-positive values resolve to page 1.
pub fn resolve_page_number(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

/// Slice `items` into the page with the given 1-based number.
pub fn paginate<T>(items: Vec<T>, number: u64, page_size: u64) -> Page<T> {
    debug_assert!(page_size > 0);
    debug_assert!(number > 0);

    let total_items = items.len() as u64;
    let total_pages = total_items.div_ceil(page_size);

    let start = (number - 1).saturating_mul(page_size);
    let items = if start >= total_items {
        Vec::new()
    } else {
        items
            .into_iter()
            .skip(start as usize)
            .take(page_size as usize)
            .collect()
    };

    Page {
        items,
        number,
        total_items,
        total_pages,
    }
}
