// ============================================================================
// APP - Application shell
// ============================================================================
// Owns the state, the browser observers and the popstate listener. Every
// navigation goes through the route guard before touching history.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};

use crate::config::AppConfig;
use crate::dom::{
    append_child, current_path, get_element_by_id, push_path, replace_path, set_document_title,
    set_inner_html, window,
};
use crate::router::{guard, GuardDecision, Route};
use crate::services::{NetworkMonitor, ServiceWorkerRuntime, SessionStore};
use crate::state::app_state::AppState;
use crate::state::SessionContext;
use crate::utils::APP_ROOT_ID;
use crate::viewmodels::{ContentViewModel, NetworkViewModel, UpdateViewModel};
use crate::views::render_app;

/// How a navigation reached us
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationSource {
    /// In-app link or redirect after an action
    Link,
    /// Page load or Back/Forward: the URL is already in history
    Location,
}

pub struct App {
    state: AppState,
    root: Element,
    network_monitor: NetworkMonitor,
    worker: ServiceWorkerRuntime,
    update_vm: Rc<UpdateViewModel>,
    popstate: Option<Closure<dyn FnMut(Event)>>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, JsValue> {
        let root = get_element_by_id(APP_ROOT_ID)
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let session = SessionContext::new(SessionStore::browser());
        if session.token().is_some() && !session.is_authenticated() {
            log::info!("⌛ [APP] Stored token has expired");
        }
        let state = AppState::new(config.clone(), session);

        // batch bursts of changes into one render
        let render_scheduled = Rc::new(Cell::new(false));
        state.subscribe_to_changes(move || {
            if render_scheduled.replace(true) {
                return;
            }
            let render_scheduled = render_scheduled.clone();
            Timeout::new(0, move || {
                render_scheduled.set(false);
                crate::rerender_app();
            })
            .forget();
        });

        let state_sw = state.clone();
        let worker = ServiceWorkerRuntime::new(
            config.service_worker_url.clone(),
            config.update_check_interval_ms,
            move |event| UpdateViewModel::on_runtime_event(&state_sw, event),
        );
        let update_vm = Rc::new(UpdateViewModel::new(Rc::new(worker.clone())));

        Ok(Self {
            state,
            root,
            network_monitor: NetworkMonitor::new(),
            worker,
            update_vm,
            popstate: None,
        })
    }

    /// Attach browser listeners and resolve the current location
    pub fn start(&mut self) -> Result<(), JsValue> {
        self.state.seed_reachability(NetworkMonitor::current_on_line());
        let state_net = self.state.clone();
        self.network_monitor
            .start_monitoring(move |event| NetworkViewModel::on_event(&state_net, event))?;

        self.worker.register();

        let popstate = Closure::wrap(Box::new(move |_event: Event| {
            crate::navigate_to_location();
        }) as Box<dyn FnMut(Event)>);
        if let Some(window) = window() {
            window.add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())?;
        }
        self.popstate = Some(popstate);

        self.navigate(Route::from_path(&current_path()), NavigationSource::Location)
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        set_inner_html(&self.root, "");
        let view = render_app(&self.state, &self.update_vm)?;
        append_child(&self.root, &view)?;
        Ok(())
    }

    pub fn navigate(&self, requested: Route, source: NavigationSource) -> Result<(), JsValue> {
        let authenticated = self.state.session.is_authenticated();
        let route = match guard(requested.clone(), authenticated) {
            GuardDecision::Render(route) => {
                if source == NavigationSource::Link && route.to_path() != current_path() {
                    push_path(&route.to_path())?;
                }
                route
            }
            GuardDecision::Redirect { to, replace } => {
                log::info!(
                    "🚧 [ROUTER] {} -> {}",
                    requested.to_path(),
                    to.to_path()
                );
                // a link never lands the refused entry; a loaded URL is overwritten
                if replace && source == NavigationSource::Location {
                    replace_path(&to.to_path())?;
                } else {
                    push_path(&to.to_path())?;
                }
                to
            }
        };

        set_document_title(&format!("{} · Portal UMKM", route.title()));
        self.state.set_route(route);
        self.load_content();
        Ok(())
    }

    /// Fetch the data of the current route, if it has any
    pub fn load_content(&self) {
        let route = self.state.current_route();
        if !ContentViewModel::has_content(&route) {
            return;
        }

        self.state.set_loading(true);
        let state = self.state.clone();
        let vm = ContentViewModel::new(state.api_client(), state.session.clone());
        spawn_local(async move {
            let result = vm.load(&route).await;
            // the user may have moved on while this was in flight
            if state.current_route() != route {
                return;
            }
            match result {
                Ok(content) => state.set_content(content),
                Err(e) if e.is_unauthorized() => {
                    match ContentViewModel::after_unauthorized(&route) {
                        Some(target) => crate::navigate(target),
                        None => state.set_error(Some(e.user_message())),
                    }
                }
                Err(e) => {
                    log::warn!("⚠️ [APP] Loading {} failed: {}", route.to_path(), e);
                    state.set_error(Some(e.user_message()));
                }
            }
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.worker.shutdown();
        self.network_monitor.stop_monitoring();
        if let (Some(window), Some(popstate)) = (window(), self.popstate.take()) {
            let _ = window
                .remove_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref());
        }
    }
}
