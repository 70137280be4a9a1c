// ============================================================================
// ROUTE TABLE
// ============================================================================
// Built once, never mutated. Order gives first-match priority.
// ============================================================================

use std::sync::OnceLock;

use super::route::{Route, RouteMatch, RouteProps};
use crate::views;

/// Route names, as referenced by links and views
pub mod names {
    pub const HOME: &str = "Home";
    pub const QUERY_USER: &str = "QueryUser";
    pub const BOOK_RETURN: &str = "BookReturn";
    pub const BOOK_DETAIL: &str = "BookDetail";
    pub const CREATE_BOOK: &str = "creat_book";
    pub const BORROW_BOOK: &str = "BorrowBook";
}

#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Route names must be unique
    pub fn new(routes: Vec<Route>) -> Self {
        debug_assert!(
            routes
                .iter()
                .enumerate()
                .all(|(i, r)| routes[..i].iter().all(|other| other.name != r.name)),
            "duplicate route name"
        );
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// First route matching the path, with its props. Params are forwarded
    /// only on routes flagged with `props`.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            route.pattern.matches(path).map(|params| RouteMatch {
                route,
                props: if route.props {
                    RouteProps::new(params)
                } else {
                    RouteProps::default()
                },
            })
        })
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// App path of a named route, or `None` for an unknown name
    pub fn path_for(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        self.by_name(name).map(|route| route.pattern.build(params))
    }
}

/// The application's routes
pub fn routes() -> &'static RouteTable {
    static TABLE: OnceLock<RouteTable> = OnceLock::new();
    TABLE.get_or_init(build_routes)
}

fn build_routes() -> RouteTable {
    RouteTable::new(vec![
        Route::eager("/Home", names::HOME, views::home::render),
        Route::lazy("/QueryUser", names::QUERY_USER, views::query_user::load),
        Route::lazy("/BookReturn", names::BOOK_RETURN, views::book_return::load),
        Route::lazy("/book/:id", names::BOOK_DETAIL, views::book_detail::load).with_props(),
        Route::lazy("/create_book", names::CREATE_BOOK, views::photo::load).with_props(),
        Route::lazy("/BorrowBook", names::BORROW_BOOK, views::borrow_book::load),
    ])
}

/// `/book/{id}`
pub fn book_detail_path(id: &str) -> String {
    routes()
        .path_for(names::BOOK_DETAIL, &[("id", id)])
        .unwrap_or_else(|| format!("/book/{}", id))
}
