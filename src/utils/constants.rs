/// Fallback backend URL, fixed at compile time.
/// `API_BASE_URL` comes from the environment or `.env` (see build.rs);
/// `window.__ENV__.API_BASE_URL` overrides it at page load.
pub const DEFAULT_BACKEND_URL: &str = match option_env!("API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:3000",
};

/// Periodic service-worker update check, 0 disables it
pub const DEFAULT_UPDATE_CHECK_INTERVAL_MS: &str = match option_env!("UPDATE_CHECK_INTERVAL_MS") {
    Some(ms) => ms,
    None => "0",
};

/// Global object injected by the container entrypoint before the wasm loads
pub const RUNTIME_ENV_GLOBAL: &str = "__ENV__";

pub const SERVICE_WORKER_URL: &str = "/sw.js";

// Durable storage layout
pub const STORAGE_KEY_TOKEN: &str = "token";
pub const STORAGE_KEY_TEMP_TOKEN: &str = "temp_token";
pub const STORAGE_KEY_USER: &str = "user";
pub const STORAGE_KEY_TEMP_PHONE: &str = "temp_phone";
pub const STORAGE_KEY_TEMP_EMAIL: &str = "temp_email";

/// Root element the app mounts into
pub const APP_ROOT_ID: &str = "app";
