// ============================================================================
// VIEWS - one component per route
// ============================================================================
// Lazily routed views expose `load()`, which the route table calls the first
// time the route is rendered.
// ============================================================================

pub mod book_detail;
pub mod book_return;
pub mod borrow_book;
pub mod home;
pub mod not_found;
pub mod photo;
pub mod query_user;
