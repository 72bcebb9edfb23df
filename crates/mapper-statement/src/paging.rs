//! LIMIT / OFFSET bookkeeping with page based pagination on top.
//!
//! Either the explicit limit/offset pair or the page/per-page pair is in
//! charge. Setting a page derives limit and offset from it; setting a limit
//! or offset while a page is active drops the page.

pub const DEFAULT_PER_PAGE: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paging {
    limit: u64,
    offset: u64,
    page: u64,
    per_page: u64,
    default_per_page: u64,
}

impl Default for Paging {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl Paging {
    pub fn new(per_page: u64) -> Self {
        Self {
            limit: 0,
            offset: 0,
            page: 0,
            per_page,
            default_per_page: per_page,
        }
    }

    pub fn set_limit(&mut self, limit: u64) {
        self.limit = limit;
        if self.page != 0 {
            self.page = 0;
            self.offset = 0;
        }
    }

    pub fn set_offset(&mut self, offset: u64) {
        self.offset = offset;
        if self.page != 0 {
            self.page = 0;
            self.limit = 0;
        }
    }

    pub fn set_page(&mut self, page: u64) {
        self.page = page;
        self.recompute();
    }

    pub fn set_per_page(&mut self, per_page: u64) {
        self.per_page = per_page;
        if self.page != 0 {
            self.recompute();
        }
    }

    /// Changes the per-page value restored by [`Paging::reset`].
    pub fn set_default_per_page(&mut self, per_page: u64) {
        self.default_per_page = per_page;
        self.per_page = per_page;
        if self.page != 0 {
            self.recompute();
        }
    }

    pub fn reset(&mut self) {
        self.limit = 0;
        self.offset = 0;
        self.page = 0;
        self.per_page = self.default_per_page;
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Per-page value restored by [`Paging::reset`].
    pub fn default_per_page(&self) -> u64 {
        self.default_per_page
    }

    fn recompute(&mut self) {
        self.limit = 0;
        self.offset = 0;
        if self.page > 0 {
            self.limit = self.per_page;
            self.offset = self.per_page.saturating_mul(self.page - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_derives_limit_and_offset() {
        let mut paging = Paging::default();
        paging.set_page(7);
        assert_eq!((paging.limit(), paging.offset()), (10, 60));

        paging.set_per_page(50);
        assert_eq!((paging.limit(), paging.offset()), (50, 300));
    }

    #[test]
    fn test_huge_page_saturates_offset() {
        let mut paging = Paging::default();
        paging.set_per_page(u64::MAX / 2);
        paging.set_page(4);
        assert_eq!(paging.limit(), u64::MAX / 2);
        assert_eq!(paging.offset(), u64::MAX);
    }

    #[test]
    fn test_per_page_without_page_keeps_limit() {
        let mut paging = Paging::default();
        paging.set_limit(5);
        paging.set_per_page(50);
        assert_eq!((paging.limit(), paging.offset()), (5, 0));
        assert_eq!(paging.per_page(), 50);
    }

    #[test]
    fn test_limit_drops_page() {
        let mut paging = Paging::default();
        paging.set_page(2);
        paging.set_limit(5);
        assert_eq!(paging.page(), 0);
        assert_eq!((paging.limit(), paging.offset()), (5, 0));
    }

    #[test]
    fn test_offset_drops_page() {
        let mut paging = Paging::default();
        paging.set_page(2);
        paging.set_offset(10);
        assert_eq!(paging.page(), 0);
        assert_eq!((paging.limit(), paging.offset()), (0, 10));
    }

    #[test]
    fn test_page_after_limit_takes_over() {
        let mut paging = Paging::default();
        paging.set_page(3);
        paging.set_limit(5);
        paging.set_page(2);
        assert_eq!((paging.limit(), paging.offset()), (10, 10));
    }

    #[test]
    fn test_page_zero_clears() {
        let mut paging = Paging::default();
        paging.set_limit(5);
        paging.set_offset(5);
        paging.set_page(0);
        assert_eq!((paging.limit(), paging.offset()), (0, 0));
    }

    #[test]
    fn test_reset_restores_default_per_page() {
        let mut paging = Paging::new(25);
        paging.set_per_page(40);
        paging.set_page(2);
        paging.reset();
        assert_eq!(paging, Paging::new(25));
        assert_eq!(paging.per_page(), 25);
        assert_eq!(paging.default_per_page(), 25);
    }
}
