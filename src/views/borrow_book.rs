// ============================================================================
// BORROW BOOK - search the catalogue and register a loan
// ============================================================================

use yew::prelude::*;

use crate::components::{status_of, Link, Status, TextField};
use crate::context::use_app_context;
use crate::hooks::use_request;
use crate::models::{Book, BorrowRequest, Message, SearchPage, SearchQuery};
use crate::router::{book_detail_path, RouteProps, ViewFn};

pub fn load() -> ViewFn {
    render
}

pub fn render(_props: &RouteProps) -> Html {
    html! { <BorrowBook /> }
}

fn empty_request() -> BorrowRequest {
    BorrowRequest {
        book_id: String::new(),
        borrower_phone: String::new(),
        borrower_name: String::new(),
        borrower_college: String::new(),
    }
}

/// Another page of the search on screen
fn page_of(last: Option<&SearchQuery>, page: u32) -> SearchQuery {
    last.cloned()
        .unwrap_or_else(|| SearchQuery::new(""))
        .page(page)
}

#[function_component(BorrowBook)]
pub fn borrow_book() -> Html {
    let ctx = use_app_context();
    let keyword = use_state(String::new);
    // Query behind the results on screen; the keyword box may have changed since
    let last_query = use_state(|| None::<SearchQuery>);
    let results = use_request::<SearchPage<Book>>();
    let form = use_state(empty_request);
    let borrowing = use_request::<Message>();

    let search = {
        let api = ctx.api.clone();
        let results = results.clone();
        let last_query = last_query.clone();
        Callback::from(move |query: SearchQuery| {
            let api = api.clone();
            last_query.set(Some(query.clone()));
            results.run(async move { api.search_books(&query).await?.json::<SearchPage<Book>>() });
        })
    };

    let on_keyword = {
        let keyword = keyword.clone();
        Callback::from(move |value: String| keyword.set(value))
    };

    let on_search = {
        let keyword = keyword.clone();
        let search = search.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            search.emit(SearchQuery::new(keyword.trim()));
        })
    };

    let go_to_page = {
        let last_query = last_query.clone();
        let search = search.clone();
        move |page: u32| {
            let query = page_of((*last_query).as_ref(), page);
            let search = search.clone();
            Callback::from(move |_: MouseEvent| search.emit(query.clone()))
        }
    };

    let select_book = {
        let form = form.clone();
        let borrowing = borrowing.clone();
        move |book_id: String| {
            let form = form.clone();
            let borrowing = borrowing.clone();
            Callback::from(move |_: MouseEvent| {
                borrowing.reset();
                form.set(BorrowRequest {
                    book_id: book_id.clone(),
                    ..(*form).clone()
                });
            })
        }
    };

    let field = |update: fn(&mut BorrowRequest, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            update(&mut next, value);
            form.set(next);
        })
    };

    let on_borrow = {
        let api = ctx.api.clone();
        let form = form.clone();
        let borrowing = borrowing.clone();
        let search = search.clone();
        let refresh = (*last_query).clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = (*form).clone();
            let blank = request.blank_fields();
            if !blank.is_empty() {
                borrowing.fail(format!("Missing: {}", blank.join(", ")));
                return;
            }

            let api = api.clone();
            let form = form.clone();
            let search = search.clone();
            let refresh = refresh.clone();
            borrowing.run(async move {
                let message = api.borrow_book(&request).await?.json::<Message>()?;
                // Availability changed
                form.set(empty_request());
                if let Some(query) = refresh {
                    search.emit(query);
                }
                Ok(message)
            });
        })
    };

    let (searching, search_error) = status_of(results.state());
    let (saving, borrow_error) = status_of(borrowing.state());
    let borrowed = borrowing
        .state()
        .value()
        .map(|done| AttrValue::from(done.message.clone()));

    html! {
        <section class="view borrow-book">
            <h1>{"Borrow a book"}</h1>
            <form class="search" onsubmit={on_search}>
                <TextField
                    label="Title or author"
                    value={(*keyword).clone()}
                    on_change={on_keyword}
                />
                <button type="submit" disabled={searching}>{"Search"}</button>
            </form>
            <Status loading={searching} error={search_error} />

            if let Some(page) = results.state().value() {
                <p class="result-count">{ format!("{} result(s)", page.total) }</p>
                <ul class="book-list">
                    { for page.data.iter().map(|book| html! {
                        <li class={classes!("book", (!book.is_available()).then_some("unavailable"))}>
                            <Link to={book_detail_path(&book.id)}>{ book.title.clone() }</Link>
                            <span class="author">{ book.author.clone() }</span>
                            <span class="copies">{ format!("{}/{} available, {} on loan", book.available, book.total, book.borrowed()) }</span>
                            <button
                                disabled={!book.is_available()}
                                onclick={select_book(book.id.clone())}
                            >{"Borrow"}</button>
                        </li>
                    }) }
                </ul>
                <div class="pager">
                    <button disabled={!page.has_previous()} onclick={go_to_page(page.page.saturating_sub(1))}>{"‹"}</button>
                    <span>{ format!("{} / {}", page.page, page.total_pages.max(1)) }</span>
                    <button disabled={!page.has_next()} onclick={go_to_page(page.page + 1)}>{"›"}</button>
                </div>
            }

            if !form.book_id.is_empty() {
                <form class="borrow-form" onsubmit={on_borrow}>
                    <h2>{ format!("Borrow {}", form.book_id) }</h2>
                    <TextField
                        label="Phone"
                        input_type="tel"
                        value={form.borrower_phone.clone()}
                        on_change={field(|r, v| r.borrower_phone = v)}
                    />
                    <TextField
                        label="Name"
                        value={form.borrower_name.clone()}
                        on_change={field(|r, v| r.borrower_name = v)}
                    />
                    <TextField
                        label="College"
                        value={form.borrower_college.clone()}
                        on_change={field(|r, v| r.borrower_college = v)}
                    />
                    <button type="submit" disabled={saving}>{"Confirm loan"}</button>
                </form>
            }
            <Status loading={saving} error={borrow_error} success={borrowed} />
        </section>
    }
}
