// ============================================================================
// HISTORY - pushState / replaceState navigation
// ============================================================================

use wasm_bindgen::prelude::*;

use crate::dom::window;

pub fn current_path() -> String {
    window()
        .and_then(|w| {
            let location = w.location();
            let path = location.pathname().ok()?;
            let search = location.search().unwrap_or_default();
            Some(format!("{}{}", path, search))
        })
        .unwrap_or_else(|| "/".to_string())
}

pub fn push_path(path: &str) -> Result<(), JsValue> {
    history()?.push_state_with_url(&JsValue::NULL, "", Some(path))
}

/// Rewrites the current entry: Back skips the replaced screen
pub fn replace_path(path: &str) -> Result<(), JsValue> {
    history()?.replace_state_with_url(&JsValue::NULL, "", Some(path))
}

fn history() -> Result<web_sys::History, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .history()
}
