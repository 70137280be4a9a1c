// ============================================================================
// ROUTER - path -> view resolution
// ============================================================================

pub mod history;
pub mod route;
pub mod table;

pub use route::{LazyView, PathPattern, Route, RouteMatch, RouteProps, ViewFn, ViewRef};
pub use table::{book_detail_path, names, routes, RouteTable};
