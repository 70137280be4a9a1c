use yew::prelude::*;

use crate::components::{status_of, Link, Status};
use crate::context::use_app_context;
use crate::hooks::use_request;
use crate::models::{BookStats, Message};
use crate::router::{names, routes, RouteProps, ViewFn};

pub fn load() -> ViewFn {
    render
}

/// The `id` path parameter is forwarded unchecked
pub fn render(props: &RouteProps) -> Html {
    let id = props.get("id").unwrap_or_default().to_string();
    html! { <BookDetail {id} /> }
}

#[derive(Properties, PartialEq)]
pub struct BookDetailProps {
    pub id: AttrValue,
}

#[function_component(BookDetail)]
pub fn book_detail(props: &BookDetailProps) -> Html {
    let ctx = use_app_context();
    let stats = use_request::<BookStats>();
    let deletion = use_request::<Message>();

    {
        let api = ctx.api.clone();
        let stats = stats.clone();
        use_effect_with(props.id.clone(), move |id| {
            let id = id.to_string();
            stats.run(async move { api.book_detail(&id).await?.json::<BookStats>() });
            || ()
        });
    }

    let on_delete = {
        let api = ctx.api.clone();
        let id = props.id.to_string();
        let deletion = deletion.clone();
        Callback::from(move |_: MouseEvent| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Delete this book?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let api = api.clone();
            let id = id.clone();
            deletion.run(async move { api.delete_book(&id).await?.json::<Message>() });
        })
    };

    let (loading, error) = status_of(stats.state());
    let (deleting, delete_error) = status_of(deletion.state());
    let deleted = deletion.state().value().is_some();
    let borrow_path = routes().path_for(names::BORROW_BOOK, &[]).unwrap_or_default();

    html! {
        <section class="view book-detail">
            <h1>{ format!("Book {}", props.id) }</h1>
            <Status {loading} {error} />
            if let Some(stats) = stats.state().value() {
                <dl class="book-stats">
                    <dt>{"Available copies"}</dt><dd>{ stats.available }</dd>
                    <dt>{"On loan"}</dt><dd>{ stats.borrowed }</dd>
                    <dt>{"Average loan"}</dt><dd>{ format!("{:.1} days", stats.average_borrow_days) }</dd>
                    if stats.available == 0 {
                        <dt>{"Next copy back in"}</dt><dd>{ format!("{} days", stats.earliest_due_days) }</dd>
                    }
                </dl>
            }
            if deleted {
                <Status loading={false} success={AttrValue::from("Book deleted")} />
            } else {
                <div class="actions">
                    <Link to={borrow_path}>{"Borrow a copy"}</Link>
                    <button class="danger" onclick={on_delete} disabled={deleting}>{"Delete"}</button>
                </div>
                <Status loading={deleting} error={delete_error} />
            }
        </section>
    }
}
