// ============================================================================
// APP - root component: context, navigation, routed view
// ============================================================================

use std::rc::Rc;
use yew::prelude::*;

use super::NavBar;
use crate::config::AppConfig;
use crate::context::{AppContext, HttpApi, Navigator};
use crate::router::history::{self, PopStateListener};
use crate::router::{names, routes, RouteProps};
use crate::views::not_found::NotFound;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: AppConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let base_path = props.config.base_path.clone();

    let api: Rc<HttpApi> = use_memo(props.config.api.clone(), |api_config| {
        log::info!("🔌 [APP] API client for {}", api_config.base_url);
        HttpApi::browser(api_config.clone())
    });

    let path = use_state({
        let base_path = base_path.clone();
        move || history::current_path(&base_path)
    });

    // Back/forward buttons
    {
        let path = path.clone();
        let base_path = base_path.clone();
        use_effect_with((), move |_| {
            let listener = PopStateListener::new(move || {
                path.set(history::current_path(&base_path));
            });
            move || drop(listener)
        });
    }

    let navigator = {
        let path = path.clone();
        Navigator::new(&base_path, Callback::from(move |next: String| path.set(next)))
    };

    let content = match routes().resolve(&path) {
        Some(matched) => matched.render(),
        None if history::is_root(&path) => routes()
            .by_name(names::HOME)
            .map(|home| (home.view.resolve())(&RouteProps::default()))
            .unwrap_or_default(),
        None => {
            log::warn!("⚠️ [ROUTER] No route for {}", *path);
            html! { <NotFound path={(*path).clone()} /> }
        }
    };

    let context = AppContext { api, navigator };

    html! {
        <ContextProvider<AppContext> context={context}>
            <div class="app-shell">
                <NavBar current={(*path).clone()} />
                <main class="app-content">
                    { content }
                </main>
            </div>
        </ContextProvider<AppContext>>
    }
}
