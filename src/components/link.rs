use yew::prelude::*;

use crate::context::use_app_context;

#[derive(Properties, PartialEq)]
pub struct LinkProps {
    /// App path, e.g. `/book/42`
    pub to: AttrValue,
    #[prop_or_default]
    pub classes: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// `<a>` that navigates through the router instead of reloading the page
#[function_component(Link)]
pub fn link(props: &LinkProps) -> Html {
    let ctx = use_app_context();
    let href = ctx.navigator.href(&props.to);

    let onclick = {
        let navigator = ctx.navigator.clone();
        let to = props.to.clone();
        Callback::from(move |e: MouseEvent| {
            // Let the browser handle ctrl/cmd-click (new tab)
            if e.ctrl_key() || e.meta_key() || e.shift_key() {
                return;
            }
            e.prevent_default();
            navigator.push(&to);
        })
    };

    html! {
        <a href={href} class={props.classes.clone()} {onclick}>
            { props.children.clone() }
        </a>
    }
}
