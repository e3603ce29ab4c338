#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitOption {
    limit: usize,
    offset: usize,
}

impl LimitOption {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Page numbers start at 1; page 0 is treated as the first page. Offsets
    /// past `usize::MAX` are clamped.
    pub fn page(page: usize, page_size: usize) -> Self {
        Self::new(page_size, page.saturating_sub(1).saturating_mul(page_size))
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}
