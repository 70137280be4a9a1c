use yew::prelude::*;

use crate::components::{status_of, Status, TextField};
use crate::context::use_app_context;
use crate::hooks::use_request;
use crate::models::{Message, ReturnRequest};
use crate::router::{RouteProps, ViewFn};

pub fn load() -> ViewFn {
    render
}

pub fn render(_props: &RouteProps) -> Html {
    html! { <BookReturn /> }
}

#[function_component(BookReturn)]
pub fn book_return() -> Html {
    let ctx = use_app_context();
    let form = use_state(|| ReturnRequest {
        book_id: String::new(),
        borrower_phone: String::new(),
    });
    let result = use_request::<Message>();

    let on_book_id = {
        let form = form.clone();
        Callback::from(move |book_id: String| {
            form.set(ReturnRequest {
                book_id,
                ..(*form).clone()
            })
        })
    };
    let on_phone = {
        let form = form.clone();
        Callback::from(move |borrower_phone: String| {
            form.set(ReturnRequest {
                borrower_phone,
                ..(*form).clone()
            })
        })
    };

    let on_submit = {
        let api = ctx.api.clone();
        let form = form.clone();
        let result = result.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let book_id = form.book_id.trim().to_string();
            let phone = form.borrower_phone.trim().to_string();
            if book_id.is_empty() || phone.is_empty() {
                result.fail("Book id and phone number are required");
                return;
            }

            let api = api.clone();
            result.run(async move { api.return_book(&book_id, &phone).await?.json::<Message>() });
        })
    };

    let (loading, error) = status_of(result.state());
    let success = result
        .state()
        .value()
        .map(|done| AttrValue::from(done.message.clone()));

    html! {
        <section class="view book-return">
            <h1>{"Return a book"}</h1>
            <form onsubmit={on_submit}>
                <TextField label="Book id" value={form.book_id.clone()} on_change={on_book_id} />
                <TextField
                    label="Borrower phone"
                    input_type="tel"
                    value={form.borrower_phone.clone()}
                    on_change={on_phone}
                />
                <button type="submit" disabled={loading}>{"Register return"}</button>
            </form>
            <Status {loading} {error} {success} />
        </section>
    }
}
