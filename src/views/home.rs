use yew::prelude::*;

use crate::components::{status_of, Link, Status};
use crate::context::use_app_context;
use crate::hooks::use_request;
use crate::models::SystemStats;
use crate::router::{names, routes, RouteProps};

pub fn render(_props: &RouteProps) -> Html {
    html! { <Home /> }
}

#[function_component(Home)]
pub fn home() -> Html {
    let ctx = use_app_context();
    let stats = use_request::<SystemStats>();

    {
        let api = ctx.api.clone();
        let stats = stats.clone();
        use_effect_with((), move |_| {
            stats.run(async move { api.system_stats().await?.json::<SystemStats>() });
            || ()
        });
    }

    let (loading, error) = status_of(stats.state());
    let shortcut = |name: &str, label: &str| match routes().path_for(name, &[]) {
        Some(path) => html! { <Link to={path} classes={classes!("card-link")}>{ label.to_string() }</Link> },
        None => html! {},
    };

    html! {
        <section class="view home">
            <h1>{"Library desk"}</h1>
            <Status {loading} {error} />
            if let Some(stats) = stats.state().value() {
                <div class="stats-grid">
                    <div class="stat"><span>{"Titles"}</span><strong>{ stats.books_sorts }</strong></div>
                    <div class="stat"><span>{"Copies"}</span><strong>{ stats.total_copies() }</strong></div>
                    <div class="stat"><span>{"Available"}</span><strong>{ stats.available_books }</strong></div>
                    <div class="stat"><span>{"On loan"}</span><strong>{ stats.borrowed_books }</strong></div>
                </div>
            }
            <div class="shortcuts">
                { shortcut(names::QUERY_USER, "Look up a borrower") }
                { shortcut(names::BORROW_BOOK, "Search & borrow") }
                { shortcut(names::BOOK_RETURN, "Return a book") }
                { shortcut(names::CREATE_BOOK, "Register a book from photos") }
            </div>
        </section>
    }
}
