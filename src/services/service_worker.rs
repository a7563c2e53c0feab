// ============================================================================
// SERVICE WORKER - Registration, update detection, periodic check
// ============================================================================
// Raises two signals for the update badge:
//   - OfflineReady: the first worker finished installing, no page controller
//   - NeedRefresh: a new worker is waiting while an old one controls the page
// Activation posts SKIP_WAITING to the waiting worker and reloads once the
// new worker takes control.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Event, EventTarget, RequestCache, ServiceWorker, ServiceWorkerContainer,
    ServiceWorkerRegistration, ServiceWorkerState,
};

use crate::error::ApiError;
use crate::state::UpdateEvent;

/// Side of the runtime the update badge talks to
pub trait WorkerRuntime {
    /// Let the waiting worker take over; `reload_pages` reloads once it does
    fn activate_new_version(&self, reload_pages: bool);
}

/// Browser operations behind one periodic update check
#[allow(async_fn_in_trait)]
pub trait UpdateProbe {
    /// Fetch the worker script bypassing every cache, returns the HTTP status
    async fn fetch_worker_script(&self) -> Result<u16, ApiError>;
    async fn update_registration(&self) -> Result<(), ApiError>;
    fn is_installing(&self) -> bool;
    fn is_online(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateCheckOutcome {
    /// Installing, offline, or a previous check still running
    Skipped,
    /// Script answered with something other than 200
    NoUpdate(u16),
    UpdateTriggered,
    /// Swallowed failure, the next tick tries again
    Failed,
}

pub struct UpdateChecker<P> {
    probe: P,
    in_flight: Cell<bool>,
}

impl<P: UpdateProbe> UpdateChecker<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            in_flight: Cell::new(false),
        }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// One tick of the periodic check. Never returns an error: failures are
    /// logged at debug level and the badge stays untouched.
    pub async fn check(&self) -> UpdateCheckOutcome {
        if self.in_flight.get() {
            log::debug!("⏭️ [SW] Previous update check still running");
            return UpdateCheckOutcome::Skipped;
        }
        if self.probe.is_installing() || !self.probe.is_online() {
            return UpdateCheckOutcome::Skipped;
        }

        self.in_flight.set(true);
        let outcome = match self.probe.fetch_worker_script().await {
            Ok(200) => match self.probe.update_registration().await {
                Ok(()) => UpdateCheckOutcome::UpdateTriggered,
                Err(e) => {
                    log::debug!("[SW] registration.update() failed: {}", e);
                    UpdateCheckOutcome::Failed
                }
            },
            Ok(status) => UpdateCheckOutcome::NoUpdate(status),
            Err(e) => {
                log::debug!("[SW] Update check failed: {}", e);
                UpdateCheckOutcome::Failed
            }
        };
        self.in_flight.set(false);
        outcome
    }
}

/// Probe backed by the live registration
pub struct BrowserUpdateProbe {
    script_url: String,
    registration: ServiceWorkerRegistration,
}

impl BrowserUpdateProbe {
    pub fn new(script_url: impl Into<String>, registration: ServiceWorkerRegistration) -> Self {
        Self {
            script_url: script_url.into(),
            registration,
        }
    }
}

impl UpdateProbe for BrowserUpdateProbe {
    async fn fetch_worker_script(&self) -> Result<u16, ApiError> {
        let response = Request::get(&self.script_url)
            .cache(RequestCache::NoStore)
            .header("cache", "no-store")
            .header("cache-control", "no-cache")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(response.status())
    }

    async fn update_registration(&self) -> Result<(), ApiError> {
        let promise = self.registration.update().map_err(js_error)?;
        JsFuture::from(promise).await.map_err(js_error)?;
        Ok(())
    }

    fn is_installing(&self) -> bool {
        self.registration.installing().is_some()
    }

    fn is_online(&self) -> bool {
        web_sys::window().is_some_and(|w| w.navigator().on_line())
    }
}

/// An installing worker's `statechange` stops mattering once it is
/// installed or discarded
fn install_settled(state: ServiceWorkerState) -> bool {
    matches!(
        state,
        ServiceWorkerState::Installed | ServiceWorkerState::Activated | ServiceWorkerState::Redundant
    )
}

/// Waiting for activation ends once the worker is active or discarded
fn activation_settled(state: ServiceWorkerState) -> bool {
    matches!(
        state,
        ServiceWorkerState::Activated | ServiceWorkerState::Redundant
    )
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

type Listener = Closure<dyn FnMut(Event)>;

struct Inner {
    script_url: String,
    check_interval_ms: u32,
    on_event: Box<dyn Fn(UpdateEvent)>,
    registration: RefCell<Option<ServiceWorkerRegistration>>,
    listeners: RefCell<Vec<(u32, EventTarget, &'static str, Listener)>>,
    next_listener_id: Cell<u32>,
    interval: RefCell<Option<Interval>>,
    reload_requested: Cell<bool>,
}

/// Browser service-worker runtime
#[derive(Clone)]
pub struct ServiceWorkerRuntime {
    inner: Rc<Inner>,
}

impl ServiceWorkerRuntime {
    pub fn new<F>(script_url: impl Into<String>, check_interval_ms: u32, on_event: F) -> Self
    where
        F: Fn(UpdateEvent) + 'static,
    {
        Self {
            inner: Rc::new(Inner {
                script_url: script_url.into(),
                check_interval_ms,
                on_event: Box::new(on_event),
                registration: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
                interval: RefCell::new(None),
                reload_requested: Cell::new(false),
            }),
        }
    }

    pub fn is_supported() -> bool {
        web_sys::window().is_some_and(|w| {
            js_sys::Reflect::has(&w.navigator(), &JsValue::from_str("serviceWorker"))
                .unwrap_or(false)
        })
    }

    /// Register the worker in the background. Unsupported browsers and
    /// registration failures only log.
    pub fn register(&self) {
        if !Self::is_supported() {
            log::info!("ℹ️ [SW] Service workers not supported, skipping registration");
            return;
        }
        let runtime = self.clone();
        spawn_local(async move {
            if let Err(e) = runtime.register_inner().await {
                log::error!("❌ [SW] Registration failed: {:?}", e);
            }
        });
    }

    async fn register_inner(&self) -> Result<(), JsValue> {
        let container = container()?;
        let promise = container.register(&self.inner.script_url);
        let registration: ServiceWorkerRegistration = JsFuture::from(promise).await?.dyn_into()?;
        log::info!("✅ [SW] Registered {}", self.inner.script_url);

        *self.inner.registration.borrow_mut() = Some(registration.clone());

        // a worker left waiting by a previous visit
        if registration.waiting().is_some() && container.controller().is_some() {
            self.emit(UpdateEvent::NeedRefresh);
        }

        let runtime = self.clone();
        self.listen(&registration, "updatefound", move |_| {
            runtime.on_update_found();
        })?;

        let runtime = self.clone();
        self.listen(&container, "controllerchange", move |_| {
            if runtime.inner.reload_requested.get() {
                reload_page();
            }
        })?;

        self.schedule_periodic_check(&registration)
    }

    fn on_update_found(&self) {
        let Some(worker) = self
            .inner
            .registration
            .borrow()
            .as_ref()
            .and_then(ServiceWorkerRegistration::installing)
        else {
            return;
        };
        log::info!("🔄 [SW] New worker installing");

        let runtime = self.clone();
        let installing = worker.clone();
        let id = self.reserve_listener_id();
        let result = self.listen_as(id, &worker, "statechange", move |_| {
            let state = installing.state();
            if install_settled(state) {
                runtime.release_later(id);
            }
            if state != ServiceWorkerState::Installed {
                return;
            }
            let has_controller = container().is_ok_and(|c| c.controller().is_some());
            if has_controller {
                runtime.emit(UpdateEvent::NeedRefresh);
            } else {
                runtime.emit(UpdateEvent::OfflineReady);
            }
        });
        if let Err(e) = result {
            log::warn!("⚠️ [SW] Could not watch installing worker: {:?}", e);
        }
    }

    /// Start the interval now if the worker is active, otherwise once the
    /// installing worker reaches `activated`
    fn schedule_periodic_check(&self, registration: &ServiceWorkerRegistration) -> Result<(), JsValue> {
        if self.inner.check_interval_ms == 0 {
            return Ok(());
        }

        let active = registration
            .active()
            .is_some_and(|w| w.state() == ServiceWorkerState::Activated);
        if active {
            self.start_interval(registration.clone());
            return Ok(());
        }

        let Some(worker) = registration.installing().or_else(|| registration.waiting()) else {
            return Ok(());
        };
        let runtime = self.clone();
        let registration = registration.clone();
        let watched: ServiceWorker = worker.clone();
        let id = self.reserve_listener_id();
        self.listen_as(id, &worker, "statechange", move |_| {
            let state = watched.state();
            if activation_settled(state) {
                runtime.release_later(id);
            }
            if state == ServiceWorkerState::Activated {
                runtime.start_interval(registration.clone());
            }
        })
    }

    fn start_interval(&self, registration: ServiceWorkerRegistration) {
        if self.inner.interval.borrow().is_some() {
            return;
        }
        let checker = Rc::new(UpdateChecker::new(BrowserUpdateProbe::new(
            self.inner.script_url.clone(),
            registration,
        )));
        let interval = Interval::new(self.inner.check_interval_ms, move || {
            let checker = checker.clone();
            spawn_local(async move {
                let outcome = checker.check().await;
                log::debug!("[SW] Periodic check: {:?}", outcome);
            });
        });
        *self.inner.interval.borrow_mut() = Some(interval);
        log::info!(
            "⏱️ [SW] Periodic update check every {} ms",
            self.inner.check_interval_ms
        );
    }

    fn emit(&self, event: UpdateEvent) {
        log::info!("📣 [SW] {:?}", event);
        (self.inner.on_event)(event);
    }

    fn reserve_listener_id(&self) -> u32 {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id.wrapping_add(1));
        id
    }

    fn listen<F>(&self, target: &EventTarget, kind: &'static str, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        self.listen_as(self.reserve_listener_id(), target, kind, handler)
    }

    fn listen_as<F>(
        &self,
        id: u32,
        target: &EventTarget,
        kind: &'static str,
        handler: F,
    ) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.inner
            .listeners
            .borrow_mut()
            .push((id, target.clone(), kind, closure));
        Ok(())
    }

    /// Detach listener `id` after the current event finishes dispatching;
    /// its closure cannot be dropped while it runs
    fn release_later(&self, id: u32) {
        let runtime = self.clone();
        Timeout::new(0, move || runtime.release(id)).forget();
    }

    fn release(&self, id: u32) {
        let released: Vec<_> = {
            let mut listeners = self.inner.listeners.borrow_mut();
            let (released, kept) = listeners
                .drain(..)
                .partition(|(listener_id, ..)| *listener_id == id);
            *listeners = kept;
            released
        };
        for (_, target, kind, closure) in released {
            let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }

    /// Stop the interval and detach every listener
    pub fn shutdown(&self) {
        self.inner.interval.borrow_mut().take();
        let listeners: Vec<_> = self.inner.listeners.borrow_mut().drain(..).collect();
        for (_, target, kind, closure) in listeners {
            let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }
}

impl WorkerRuntime for ServiceWorkerRuntime {
    fn activate_new_version(&self, reload_pages: bool) {
        self.inner.reload_requested.set(reload_pages);
        let waiting = self
            .inner
            .registration
            .borrow()
            .as_ref()
            .and_then(ServiceWorkerRegistration::waiting);

        match waiting {
            Some(worker) => {
                log::info!("⬆️ [SW] Activating waiting worker");
                if let Err(e) = worker.post_message(&skip_waiting_message()) {
                    log::error!("❌ [SW] SKIP_WAITING failed: {:?}", e);
                }
            }
            None if reload_pages => reload_page(),
            None => {}
        }
    }
}

fn container() -> Result<ServiceWorkerContainer, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    Ok(window.navigator().service_worker())
}

fn skip_waiting_message() -> JsValue {
    let message = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&message, &"type".into(), &"SKIP_WAITING".into());
    message.into()
}

fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            log::error!("❌ [SW] Reload failed: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    struct MockProbe {
        status: Result<u16, ApiError>,
        installing: bool,
        online: bool,
        fetches: Cell<u32>,
        updates: Cell<u32>,
        fail_update: bool,
    }

    impl MockProbe {
        fn answering(status: u16) -> Self {
            Self {
                status: Ok(status),
                installing: false,
                online: true,
                fetches: Cell::new(0),
                updates: Cell::new(0),
                fail_update: false,
            }
        }
    }

    impl UpdateProbe for MockProbe {
        async fn fetch_worker_script(&self) -> Result<u16, ApiError> {
            self.fetches.set(self.fetches.get() + 1);
            self.status.clone()
        }

        async fn update_registration(&self) -> Result<(), ApiError> {
            self.updates.set(self.updates.get() + 1);
            if self.fail_update {
                Err(ApiError::Network("update rejected".into()))
            } else {
                Ok(())
            }
        }

        fn is_installing(&self) -> bool {
            self.installing
        }

        fn is_online(&self) -> bool {
            self.online
        }
    }

    #[test]
    fn status_200_triggers_registration_update() {
        let checker = UpdateChecker::new(MockProbe::answering(200));
        assert_eq!(block_on(checker.check()), UpdateCheckOutcome::UpdateTriggered);
        assert_eq!(checker.probe().updates.get(), 1);
    }

    #[test]
    fn other_status_skips_update_without_error() {
        let checker = UpdateChecker::new(MockProbe::answering(500));
        assert_eq!(block_on(checker.check()), UpdateCheckOutcome::NoUpdate(500));
        assert_eq!(checker.probe().updates.get(), 0);
    }

    #[test]
    fn network_failure_is_swallowed() {
        let mut probe = MockProbe::answering(200);
        probe.status = Err(ApiError::Network("offline".into()));
        let checker = UpdateChecker::new(probe);
        assert_eq!(block_on(checker.check()), UpdateCheckOutcome::Failed);
        assert_eq!(checker.probe().updates.get(), 0);
        // the flag is released after a failure
        assert_eq!(block_on(checker.check()), UpdateCheckOutcome::Failed);
        assert_eq!(checker.probe().fetches.get(), 2);
    }

    #[test]
    fn rejected_update_is_swallowed() {
        let mut probe = MockProbe::answering(200);
        probe.fail_update = true;
        let checker = UpdateChecker::new(probe);
        assert_eq!(block_on(checker.check()), UpdateCheckOutcome::Failed);
    }

    #[test]
    fn skipped_while_installing_or_offline() {
        let mut probe = MockProbe::answering(200);
        probe.installing = true;
        let checker = UpdateChecker::new(probe);
        assert_eq!(block_on(checker.check()), UpdateCheckOutcome::Skipped);
        assert_eq!(checker.probe().fetches.get(), 0);

        let mut probe = MockProbe::answering(200);
        probe.online = false;
        let checker = UpdateChecker::new(probe);
        assert_eq!(block_on(checker.check()), UpdateCheckOutcome::Skipped);
        assert_eq!(checker.probe().fetches.get(), 0);
    }

    #[test]
    fn overlapping_tick_is_skipped() {
        let checker = UpdateChecker::new(MockProbe::answering(200));
        checker.in_flight.set(true);
        assert_eq!(block_on(checker.check()), UpdateCheckOutcome::Skipped);
        assert_eq!(checker.probe().fetches.get(), 0);
    }

    #[test]
    fn install_watch_settles_once_installed_or_discarded() {
        assert!(!install_settled(ServiceWorkerState::Installing));
        assert!(install_settled(ServiceWorkerState::Installed));
        assert!(install_settled(ServiceWorkerState::Redundant));
        assert!(!activation_settled(ServiceWorkerState::Installed));
        assert!(!activation_settled(ServiceWorkerState::Activating));
        assert!(activation_settled(ServiceWorkerState::Activated));
        assert!(activation_settled(ServiceWorkerState::Redundant));
    }

    #[test]
    fn each_listener_gets_its_own_id() {
        let runtime = ServiceWorkerRuntime::new("/sw.js", 0, |_| {});
        let first = runtime.reserve_listener_id();
        let second = runtime.reserve_listener_id();
        assert_ne!(first, second);

        runtime.release(first);
        runtime.shutdown();
        assert!(runtime.inner.listeners.borrow().is_empty());
    }
}
