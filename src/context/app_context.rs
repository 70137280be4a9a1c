// ============================================================================
// APP CONTEXT - explicitly passed dependencies
// ============================================================================
// The API client and navigator are created once by `App` and shared with
// every view through a Yew context instead of module-level singletons.
// ============================================================================

use std::rc::Rc;
use yew::prelude::*;

use crate::router::history;
use crate::services::ApiClient;

/// API client as used in the browser
pub type HttpApi = ApiClient;

/// Pushes history entries and tells `App` which path to render
#[derive(Clone, PartialEq)]
pub struct Navigator {
    base_path: Rc<str>,
    on_change: Callback<String>,
}

impl Navigator {
    pub fn new(base_path: &str, on_change: Callback<String>) -> Self {
        Self {
            base_path: Rc::from(base_path),
            on_change,
        }
    }

    /// Navigate to an app path (`/book/42`)
    pub fn push(&self, path: &str) {
        log::info!("🧭 [ROUTER] Navigating to {}", path);
        if let Err(e) = history::push(&self.base_path, path) {
            log::error!("❌ [ROUTER] pushState failed: {:?}", e);
        }
        self.on_change.emit(path.to_string());
    }

    /// Browser URL for an app path
    pub fn href(&self, path: &str) -> String {
        history::href(&self.base_path, path)
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub api: Rc<HttpApi>,
    pub navigator: Navigator,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api) && self.navigator == other.navigator
    }
}

/// Context provided by `App`; every routed view is rendered below it
#[hook]
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext is provided by App")
}
