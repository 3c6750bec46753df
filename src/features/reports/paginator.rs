use serde::Serialize;

/// One page of a filtered sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Page actually served after clamping (1-based)
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice `[(page-1)*size, page*size)` clipped to the input length.
///
/// Out-of-range pages are clamped into `[1, total_pages]` instead of yielding
/// an empty slice. A zero page size is treated as a single unbounded page.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> Page<'_, T> {
    let total_items = items.len();
    let size = if page_size == 0 { total_items.max(1) } else { page_size };
    let total_pages = total_items.div_ceil(size);

    let page = page.clamp(1, total_pages.max(1));
    let start = ((page - 1) * size).min(total_items);
    let end = (page * size).min(total_items);

    Page {
        items: &items[start..end],
        page,
        total_pages,
        total_items,
    }
}

/// Pagination control state for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    pub current_page: usize,
    pub total_pages: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub pages: Vec<PageButton>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub number: usize,
    pub active: bool,
}

impl PaginationControls {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        let pages = (1..=total_pages)
            .map(|number| PageButton {
                number,
                active: number == current_page,
            })
            .collect();

        Self {
            current_page,
            total_pages,
            prev_enabled: current_page > 1,
            next_enabled: current_page < total_pages,
            pages,
        }
    }

    /// Controls are hidden when everything fits on one page
    pub fn is_hidden(&self) -> bool {
        self.total_pages <= 1
    }
}

impl<T> From<&Page<'_, T>> for PaginationControls {
    fn from(page: &Page<'_, T>) -> Self {
        PaginationControls::new(page.page, page.total_pages)
    }
}
