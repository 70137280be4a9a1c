// ============================================================================
// QUERY USER - borrower lookup by phone number
// ============================================================================

use chrono::Local;
use yew::prelude::*;

use crate::components::{status_of, Link, Status, TextField};
use crate::context::use_app_context;
use crate::hooks::use_request;
use crate::models::{BorrowerInfo, LoanCount};
use crate::router::{book_detail_path, RouteProps, ViewFn};

pub fn load() -> ViewFn {
    render
}

pub fn render(_props: &RouteProps) -> Html {
    html! { <QueryUser /> }
}

#[function_component(QueryUser)]
pub fn query_user() -> Html {
    let ctx = use_app_context();
    let phone = use_state(String::new);
    let loans = use_request::<LoanCount>();
    let details = use_request::<Option<BorrowerInfo>>();

    let on_phone = {
        let phone = phone.clone();
        Callback::from(move |value: String| phone.set(value))
    };

    let on_submit = {
        let api = ctx.api.clone();
        let phone = phone.clone();
        let loans = loans.clone();
        let details = details.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let number = phone.trim().to_string();
            if number.is_empty() {
                loans.fail("Enter a phone number");
                details.reset();
                return;
            }

            // Independent requests; either may finish first
            let api_loans = api.clone();
            let count_number = number.clone();
            loans.run(async move {
                api_loans.get_user_info(&count_number).await?.json::<LoanCount>()
            });

            let api_details = api.clone();
            details.run(async move {
                match api_details.get_borrower_info(&number).await {
                    Ok(response) => response.json::<BorrowerInfo>().map(Some),
                    // No open loans: the backend answers 404
                    Err(e) if e.response().map(|r| r.status) == Some(404) => Ok(None),
                    Err(e) => Err(e),
                }
            });
        })
    };

    let (loading, error) = status_of(loans.state());
    let now = Local::now().naive_local();

    html! {
        <section class="view query-user">
            <h1>{"Borrower lookup"}</h1>
            <form onsubmit={on_submit}>
                <TextField
                    label="Phone number"
                    input_type="tel"
                    value={(*phone).clone()}
                    on_change={on_phone}
                />
                <button type="submit" disabled={loading}>{"Search"}</button>
            </form>
            <Status {loading} {error} />

            if let Some(count) = loans.state().value() {
                <p class="loan-count">{ format!("Books currently borrowed: {}", count.borrowed_count) }</p>
            }

            if let Some(Some(info)) = details.state().value() {
                <div class="borrower-card">
                    <h2>{ info.name.clone() }</h2>
                    <p>{ info.college.clone() }</p>
                    <table class="loans">
                        <thead>
                            <tr><th>{"Book"}</th><th>{"Borrowed"}</th><th>{"Due"}</th><th></th></tr>
                        </thead>
                        <tbody>
                            { for info.books.iter().map(|loan| {
                                let days = loan.days_until_due(now);
                                let remaining = if loan.is_overdue(now) {
                                    format!("overdue by {} days", -days)
                                } else {
                                    format!("{} days left", days)
                                };
                                html! {
                                    <tr class={classes!(loan.is_overdue(now).then_some("overdue"))}>
                                        <td><Link to={book_detail_path(&loan.book_id)}>{ loan.book_id.clone() }</Link></td>
                                        <td>{ loan.borrow_date.format("%Y-%m-%d").to_string() }</td>
                                        <td>{ loan.due_date.format("%Y-%m-%d").to_string() }</td>
                                        <td>{ remaining }</td>
                                    </tr>
                                }
                            }) }
                        </tbody>
                    </table>
                </div>
            }
        </section>
    }
}
