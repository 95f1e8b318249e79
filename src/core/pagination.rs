use crate::core::constants::FIRST_PAGE;

/// Current page number, never below [`FIRST_PAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationController {
    page: u32,
}

impl PaginationController {
    pub fn new(start_page: u32) -> Self {
        Self {
            page: start_page.max(FIRST_PAGE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Whether the "Previous" control should be offered at all.
    pub fn has_previous(&self) -> bool {
        self.page > FIRST_PAGE
    }

    /// Advance one page. There is no upper bound other than `u32::MAX`;
    /// running past the last page is discovered by the fetch failing.
    pub fn next(&mut self) -> bool {
        match self.page.checked_add(1) {
            Some(page) => {
                self.page = page;
                true
            }
            None => false,
        }
    }

    /// Go back one page; a no-op on the first page.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(FIRST_PAGE)
    }
}
