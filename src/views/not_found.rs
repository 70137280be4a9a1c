use yew::prelude::*;

use crate::components::Link;

#[derive(Properties, PartialEq)]
pub struct NotFoundProps {
    pub path: AttrValue,
}

#[function_component(NotFound)]
pub fn not_found(props: &NotFoundProps) -> Html {
    html! {
        <section class="view not-found">
            <h1>{"Page not found"}</h1>
            <p>{ format!("Nothing lives at {}", props.path) }</p>
            <Link to="/Home">{"Back to the desk"}</Link>
        </section>
    }
}
