//! Page index and page size bookkeeping.

/// Page sizes offered in the table footer.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 25, 50];

/// Where the item count comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Total {
    /// Length of the locally filtered collection.
    Local(usize),
    /// Count reported by the backend for server-paged resources.
    Remote { total: usize, pages: usize },
}

impl Total {
    pub fn items(&self) -> usize {
        match self {
            Total::Local(n) => *n,
            Total::Remote { total, .. } => *total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
    total: Total,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            total: Total::Local(0),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> Total {
        self.total
    }

    /// Number of pages, never less than one.
    pub fn page_count(&self) -> usize {
        let count = match self.total {
            Total::Local(n) => n.div_ceil(self.page_size),
            Total::Remote { total, pages } => pages.max(total.div_ceil(self.page_size)),
        };
        count.max(1)
    }

    pub fn set_total(&mut self, total: Total) {
        self.total = total;
    }

    /// Change the page size and go back to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    /// Step to the next entry of [`PAGE_SIZES`], wrapping around.
    pub fn cycle_page_size(&mut self) {
        let next = PAGE_SIZES
            .iter()
            .position(|s| *s == self.page_size)
            .map(|i| PAGE_SIZES[(i + 1) % PAGE_SIZES.len()])
            .unwrap_or(PAGE_SIZES[0]);
        self.set_page_size(next);
    }

    /// Returns true when the page index changed.
    pub fn next(&mut self) -> bool {
        if self.page + 1 < self.page_count() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Pull the page index back into range after the total shrank.
    pub fn clamp(&mut self) {
        self.page = self.page.min(self.page_count() - 1);
    }

    /// Items of the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    /// 1-based row range of the current page for footer display, e.g. `11-20 of 42`.
    pub fn range_label(&self) -> String {
        let total = self.total.items();
        if total == 0 {
            return "0 of 0".to_string();
        }
        let start = self.page * self.page_size + 1;
        let end = ((self.page + 1) * self.page_size).min(total);
        format!("{}-{} of {}", start.min(total), end, total)
    }
}
