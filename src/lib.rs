// ============================================================================
// LIBRARY PORTAL - library desk frontend (Yew + WASM)
// ============================================================================
// - router:     static route table, lazy views, browser history
// - services:   API client over a pluggable transport (gloo-net in browser)
// - context:    API client + navigator shared with the views
// - views:      one component per route
// - components: root App and shared widgets
// ============================================================================

pub mod components;
pub mod config;
pub mod context;
pub mod hooks;
pub mod models;
pub mod router;
pub mod services;
pub mod views;

use wasm_bindgen::prelude::*;

use crate::components::{App, AppProps};
use crate::config::AppConfig;

/// Element the app is mounted on
pub const MOUNT_POINT_ID: &str = "app";

/// Install panic hook and logger, then mount `App` on `#app`
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
    log::info!(
        "📚 Library portal starting (api: {}, timeout: {}ms, base: {})",
        config.api.base_url,
        config.api.timeout_ms,
        config.base_path
    );

    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(MOUNT_POINT_ID))
        .ok_or_else(|| JsValue::from_str("No #app element found"))?;

    yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
    Ok(())
}
