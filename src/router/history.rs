// ============================================================================
// HISTORY - browser location under a configurable base path
// ============================================================================
// The app may be served under a prefix (BASE_URL at build time). Routes are
// always matched against the path with that prefix removed.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Event};

/// Ensure the base starts and ends with `/`
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Turn a browser pathname into an app path (`/app/Home` -> `/Home`).
/// Paths outside the base are returned unchanged.
pub fn strip_base(base: &str, location: &str) -> String {
    let base = normalize_base(base);
    if base == "/" {
        return ensure_leading_slash(location);
    }

    let without_slash = base.trim_end_matches('/');
    match location.strip_prefix(without_slash) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with(&['/', '?', '#'][..]) => ensure_leading_slash(rest),
        _ => ensure_leading_slash(location),
    }
}

/// Browser URL for an app path (`/Home` -> `/app/Home`)
pub fn href(base: &str, path: &str) -> String {
    let base = normalize_base(base);
    format!("{}{}", base, path.trim_start_matches('/'))
}

pub fn is_root(path: &str) -> bool {
    matches!(super::route::path_only(path), "" | "/")
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Current app path (pathname + query) read from `window.location`
pub fn current_path(base: &str) -> String {
    let location = window().map(|w| w.location());
    let pathname = location
        .as_ref()
        .and_then(|l| l.pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    let search = location
        .as_ref()
        .and_then(|l| l.search().ok())
        .unwrap_or_default();

    strip_base(base, &format!("{}{}", pathname, search))
}

/// Push a new history entry for an app path
pub fn push(base: &str, path: &str) -> Result<(), JsValue> {
    let history = window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .history()?;
    history.push_state_with_url(&JsValue::NULL, "", Some(&href(base, path)))
}

/// `popstate` subscription, removed when dropped
pub struct PopStateListener {
    closure: Closure<dyn FnMut(Event)>,
}

impl PopStateListener {
    pub fn new<F>(mut on_change: F) -> Option<Self>
    where
        F: FnMut() + 'static,
    {
        let win = window()?;
        let closure = Closure::<dyn FnMut(Event)>::new(move |_e: Event| on_change());

        if let Err(e) =
            win.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
        {
            log::error!("❌ [ROUTER] Could not listen to popstate: {:?}", e);
            return None;
        }

        Some(Self { closure })
    }
}

impl Drop for PopStateListener {
    fn drop(&mut self) {
        if let Some(win) = window() {
            let _ = win.remove_event_listener_with_callback(
                "popstate",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}
