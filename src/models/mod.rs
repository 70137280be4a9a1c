pub mod book;
pub mod borrow;
pub mod scan;
pub mod stats;

pub use book::{
    normalize_isbn, validate_isbn13, Book, BookStats, CreatedBook, NewBook, SearchPage,
    SearchQuery,
};
pub use borrow::{BorrowRequest, BorrowerInfo, Loan, LoanCount, Message, ReturnRequest};
pub use scan::{BookDraft, ScanImage, ScanKind, ScanResult, ScanSession, SUPPORTED_IMAGE_TYPES};
pub use stats::SystemStats;
