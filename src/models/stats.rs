use serde::Deserialize;

/// Response of `/stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SystemStats {
    /// Number of distinct titles
    pub books_sorts: u32,
    pub available_books: u32,
    pub borrowed_books: u32,
}

impl SystemStats {
    pub fn total_copies(&self) -> u32 {
        self.available_books + self.borrowed_books
    }
}
