//! Fixed-size paging over an already filtered and sorted list.

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Zero-based index of this page
    pub page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Total number of items across all pages
    pub total_count: usize,
}

impl<T> Page<T> {
    /// Whether there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    /// Whether there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.page > 0 && self.total_pages > 0
    }
}

/// Slice `items` into page `page` (zero-based) of `page_size` entries.
///
/// Pages past the end come back empty. A `page_size` of zero yields no pages.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total_count = items.len();

    if page_size == 0 {
        return Page {
            items: Vec::new(),
            page,
            total_pages: 0,
            total_count,
        };
    }

    let total_pages = total_count.div_ceil(page_size);
    let start = page.saturating_mul(page_size).min(total_count);
    let end = start.saturating_add(page_size).min(total_count);

    Page {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total_count,
    }
}
