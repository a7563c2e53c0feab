// ============================================================================
// CONFIG - Resolved once at page load
// ============================================================================
// Order: window.__ENV__ (injected by the container) > compile-time env
// (build.rs / .env) > hard-coded local fallback.
// ============================================================================

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::utils::constants::{
    DEFAULT_BACKEND_URL, DEFAULT_UPDATE_CHECK_INTERVAL_MS, RUNTIME_ENV_GLOBAL, SERVICE_WORKER_URL,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub service_worker_url: String,
    /// Periodic update check for the service worker, 0 disables it
    pub update_check_interval_ms: u32,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: normalize_base_url(DEFAULT_BACKEND_URL)
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            service_worker_url: SERVICE_WORKER_URL.to_string(),
            update_check_interval_ms: DEFAULT_UPDATE_CHECK_INTERVAL_MS.parse().unwrap_or(0),
            enable_logging: true,
        }
    }
}

/// Shape of `window.__ENV__`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RuntimeEnv {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub update_check_interval_ms: Option<serde_json::Value>,
    #[serde(default)]
    pub enable_logging: Option<serde_json::Value>,
}

impl AppConfig {
    /// Read the injected runtime env from the page
    pub fn load() -> Self {
        let runtime = read_runtime_env();
        if runtime.is_none() {
            log::info!("ℹ️ [CONFIG] No window.{} found, using build defaults", RUNTIME_ENV_GLOBAL);
        }
        Self::from_runtime(runtime)
    }

    pub fn from_runtime(runtime: Option<RuntimeEnv>) -> Self {
        let mut config = Self::default();
        let Some(env) = runtime else {
            return config;
        };

        if let Some(url) = env.api_base_url.as_deref().and_then(normalize_base_url) {
            config.api_base_url = url;
        }
        if let Some(ms) = env.update_check_interval_ms.as_ref().and_then(as_u32) {
            config.update_check_interval_ms = ms;
        }
        if let Some(enabled) = env.enable_logging.as_ref().and_then(as_bool) {
            config.enable_logging = enabled;
        }
        config
    }
}

/// Empty values and unreplaced `${PLACEHOLDER}`s count as absent
fn normalize_base_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    if url.is_empty() || url.starts_with('$') {
        return None;
    }
    Some(url.trim_end_matches('/').to_string())
}

// Entrypoint scripts write everything as strings
fn as_u32(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_bool(value: &serde_json::Value) -> Option<bool> {
    match value {
        serde_json::Value::Bool(b) => Some(*b),
        serde_json::Value::String(s) => match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn read_runtime_env() -> Option<RuntimeEnv> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(RUNTIME_ENV_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    let json = js_sys::JSON::stringify(&value).ok()?.as_string()?;
    match serde_json::from_str(&json) {
        Ok(env) => Some(env),
        Err(e) => {
            log::warn!("⚠️ [CONFIG] window.{} is malformed: {}", RUNTIME_ENV_GLOBAL, e);
            None
        }
    }
}
