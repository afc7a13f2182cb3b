/// Fixed page size of the events endpoint.
pub const PAGE_SIZE: u32 = 30;
pub const INITIAL_PAGE: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Page the next load-more will request. Never decremented.
    pub page: u32,
    pub can_load_more: bool,
    pub is_loading: bool,
    pub is_refreshing: bool,
    /// Last activity fetch failed; pagination is stopped until a retry.
    pub stalled: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: INITIAL_PAGE,
            can_load_more: true,
            is_loading: false,
            is_refreshing: false,
            stalled: false,
        }
    }
}

impl PaginationState {
    /// Back to page one with load-more enabled. Loading/refreshing flags are left alone.
    pub fn reset(&mut self) {
        self.page = INITIAL_PAGE;
        self.can_load_more = true;
        self.stalled = false;
    }

    /// Applies the page rule after a successful fetch of `returned` events.
    pub fn advance(&mut self, returned: usize, exhaustive: bool) {
        let full_page = !exhaustive && returned == PAGE_SIZE as usize;
        self.can_load_more = full_page;
        if full_page {
            self.page += 1;
        }
        self.stalled = false;
    }

    /// A failed fetch ends pagination at the current page.
    pub fn stall(&mut self) {
        self.can_load_more = false;
        self.stalled = true;
    }
}
