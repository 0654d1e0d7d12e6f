use crate::consts::consts::PAGINATION_SIZE;

#[derive(Debug, Clone)]
pub struct PaginationOptions {
    pub page_size: usize,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl PaginationOptions {
    /// Records rendered per turn, at least one
    pub fn set_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page_size: PAGINATION_SIZE,
        }
    }
}
