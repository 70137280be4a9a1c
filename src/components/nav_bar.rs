use yew::prelude::*;

use super::Link;
use crate::router::{names, routes};

const ENTRIES: [(&str, &str); 5] = [
    (names::HOME, "Home"),
    (names::QUERY_USER, "Borrowers"),
    (names::BORROW_BOOK, "Borrow"),
    (names::BOOK_RETURN, "Return"),
    (names::CREATE_BOOK, "Add book"),
];

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
    /// Path currently rendered
    pub current: AttrValue,
}

#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
    let active = routes().resolve(&props.current).map(|m| m.name());

    html! {
        <nav class="nav-bar">
            <span class="nav-title">{"📚 Library Desk"}</span>
            { for ENTRIES.iter().filter_map(|(name, label)| {
                let path = routes().path_for(name, &[])?;
                let classes = classes!("nav-link", (active == Some(*name)).then_some("active"));
                Some(html! {
                    <Link to={path} {classes}>{ *label }</Link>
                })
            }) }
        </nav>
    }
}
