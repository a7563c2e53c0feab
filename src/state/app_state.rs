// ============================================================================
// APP STATE - Global application state
// ============================================================================
// Shared Rc<RefCell<..>> handles. Mutators notify subscribers only when the
// value actually changed; app.rs subscribes with a full re-render.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::router::Route;
use crate::services::ApiClient;
use crate::state::{ConnectivityEvent, ReachabilityState, SessionContext, UpdateEvent, UpdateStatus};
use crate::viewmodels::content_viewmodel::ScreenContent;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: SessionContext,

    pub route: Rc<RefCell<Route>>,
    pub reachability: Rc<RefCell<ReachabilityState>>,
    pub update_status: Rc<RefCell<UpdateStatus>>,

    // Form feedback for the current screen
    pub loading: Rc<RefCell<bool>>,
    pub error_message: Rc<RefCell<Option<String>>>,
    pub content: Rc<RefCell<Option<ScreenContent>>>,

    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    pub fn new(config: AppConfig, session: SessionContext) -> Self {
        Self {
            config,
            session,
            route: Rc::new(RefCell::new(Route::Home)),
            reachability: Rc::new(RefCell::new(ReachabilityState::new())),
            update_status: Rc::new(RefCell::new(UpdateStatus::Idle)),
            loading: Rc::new(RefCell::new(false)),
            error_message: Rc::new(RefCell::new(None)),
            content: Rc::new(RefCell::new(None)),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Backend client carrying this session's token
    pub fn api_client(&self) -> ApiClient {
        ApiClient::new(self.config.api_base_url.clone()).with_session(self.session.clone())
    }

    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn notify_subscribers(&self) {
        // clone first: a subscriber may subscribe again while rendering
        let subscribers: Vec<Rc<dyn Fn()>> = self.change_subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }

    pub fn current_route(&self) -> Route {
        self.route.borrow().clone()
    }

    /// Switch screen; any feedback from the previous one is dropped
    pub fn set_route(&self, route: Route) {
        if *self.route.borrow() == route {
            return;
        }
        *self.route.borrow_mut() = route;
        *self.content.borrow_mut() = None;
        *self.error_message.borrow_mut() = None;
        *self.loading.borrow_mut() = false;
        self.notify_subscribers();
    }

    pub fn seed_reachability(&self, on_line: Option<bool>) {
        *self.reachability.borrow_mut() = ReachabilityState::seeded(on_line);
        self.notify_subscribers();
    }

    pub fn apply_connectivity(&self, event: ConnectivityEvent) {
        let changed = self.reachability.borrow_mut().apply(event);
        if changed {
            self.notify_subscribers();
        }
    }

    pub fn dismiss_banner(&self) {
        let changed = self.reachability.borrow_mut().dismiss();
        if changed {
            self.notify_subscribers();
        }
    }

    pub fn apply_update_event(&self, event: UpdateEvent) {
        let current = *self.update_status.borrow();
        let next = current.transition(event);
        if next != current {
            *self.update_status.borrow_mut() = next;
            self.notify_subscribers();
        }
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
        self.notify_subscribers();
    }

    pub fn set_content(&self, content: Option<ScreenContent>) {
        *self.content.borrow_mut() = content;
        *self.loading.borrow_mut() = false;
        self.notify_subscribers();
    }

    pub fn set_error(&self, message: Option<String>) {
        *self.error_message.borrow_mut() = message;
        *self.loading.borrow_mut() = false;
        self.notify_subscribers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SessionStore;
    use crate::state::BannerKind;
    use crate::utils::MemoryStorage;
    use std::cell::Cell;

    fn state() -> (AppState, Rc<Cell<u32>>) {
        let session = SessionContext::new(SessionStore::new(Rc::new(MemoryStorage::new())));
        let state = AppState::new(AppConfig::default(), session);
        let renders = Rc::new(Cell::new(0));
        let counter = renders.clone();
        state.subscribe_to_changes(move || counter.set(counter.get() + 1));
        (state, renders)
    }

    #[test]
    fn repeated_connectivity_event_does_not_rerender() {
        let (state, renders) = state();
        state.apply_connectivity(ConnectivityEvent::WentOffline);
        state.apply_connectivity(ConnectivityEvent::WentOffline);
        assert_eq!(renders.get(), 1);
        assert_eq!(state.reachability.borrow().banner(), Some(BannerKind::Offline));

        state.dismiss_banner();
        state.dismiss_banner();
        assert_eq!(renders.get(), 2);
    }

    #[test]
    fn update_events_drive_status() {
        let (state, renders) = state();
        state.apply_update_event(UpdateEvent::NeedRefresh);
        assert_eq!(*state.update_status.borrow(), UpdateStatus::UpdateAvailable);
        state.apply_update_event(UpdateEvent::Dismissed);
        assert_eq!(*state.update_status.borrow(), UpdateStatus::Idle);
        state.apply_update_event(UpdateEvent::Dismissed);
        assert_eq!(renders.get(), 2);
    }

    #[test]
    fn route_change_clears_feedback() {
        let (state, _) = state();
        state.set_error(Some("Password salah".into()));
        state.set_route(Route::Register);
        assert_eq!(*state.error_message.borrow(), None);
        assert_eq!(state.current_route(), Route::Register);
    }
}
