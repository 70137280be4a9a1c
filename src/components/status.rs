use yew::prelude::*;

use crate::hooks::RequestState;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub success: Option<AttrValue>,
}

/// Loading indicator / error / confirmation line under a form
#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    if props.loading {
        return html! { <p class="status loading">{"⏳ Loading..."}</p> };
    }
    if let Some(error) = &props.error {
        return html! { <p class="status error">{ format!("❌ {}", error) }</p> };
    }
    if let Some(success) = &props.success {
        return html! { <p class="status success">{ format!("✅ {}", success) }</p> };
    }
    html! {}
}

/// Props for `Status` from a request state
pub fn status_of<T>(state: &RequestState<T>) -> (bool, Option<AttrValue>) {
    (
        state.is_loading(),
        state.error().map(|e| AttrValue::from(e.to_string())),
    )
}
