// ============================================================================
// UMKM PORTAL PWA - FRONTEND MVVM (PURE RUST)
// ============================================================================
// Strict MVVM layout:
// - Views: functions that render DOM (no logic)
// - ViewModels: UI logic, return values
// - Services: backend and browser runtime I/O
// - State: Rc<RefCell> state + explicit state machines
// - Models: structures shared with the backend
// ============================================================================

pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
pub mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::{App, NavigationSource};
use crate::config::AppConfig;
use crate::router::Route;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let config = AppConfig::load();
    if !config.enable_logging {
        log::set_max_level(log::LevelFilter::Warn);
    }
    log::info!("🚀 Portal UMKM - backend {}", config.api_base_url);

    let mut app = App::new(config)?;
    app.start()?;
    app.render()?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });
    Ok(())
}

/// Full re-render of the current screen
pub fn rerender_app() {
    APP.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => {
            if let Some(app) = slot.as_mut() {
                if let Err(e) = app.render() {
                    log::error!("❌ [RERENDER] {:?}", e);
                }
            }
        }
        Err(_) => log::warn!("⚠️ [RERENDER] App busy, skipping"),
    });
}

/// In-app navigation through the route guard
pub fn navigate(route: Route) {
    with_app(|app| app.navigate(route, NavigationSource::Link));
}

/// Back/Forward: resolve whatever the URL now says
pub fn navigate_to_location() {
    with_app(|app| {
        app.navigate(
            Route::from_path(&dom::current_path()),
            NavigationSource::Location,
        )
    });
}

/// Re-fetch the data of the current screen
pub fn reload_content() {
    with_app(|app| {
        app.load_content();
        Ok(())
    });
}

fn with_app<F>(f: F)
where
    F: FnOnce(&App) -> Result<(), JsValue>,
{
    APP.with(|cell| match cell.try_borrow() {
        Ok(slot) => match slot.as_ref() {
            Some(app) => {
                if let Err(e) = f(app) {
                    log::error!("❌ [APP] {:?}", e);
                }
            }
            None => log::warn!("⚠️ [APP] Not initialised yet"),
        },
        Err(_) => log::warn!("⚠️ [APP] Busy, dropping request"),
    });
}
