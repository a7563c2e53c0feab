// ============================================================================
// UPDATE VIEWMODEL - Update / offline-ready toast
// ============================================================================

use std::rc::Rc;

use crate::services::WorkerRuntime;
use crate::state::{AppState, ToastAction, UpdateEvent, UpdateStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastModel {
    pub message: &'static str,
    pub action: ToastAction,
    pub action_label: &'static str,
}

pub struct UpdateViewModel {
    runtime: Rc<dyn WorkerRuntime>,
}

impl UpdateViewModel {
    pub fn new(runtime: Rc<dyn WorkerRuntime>) -> Self {
        Self { runtime }
    }

    pub fn toast(status: UpdateStatus) -> Option<ToastModel> {
        match status.toast_action()? {
            ToastAction::Reload => Some(ToastModel {
                message: "Versi baru tersedia. Muat ulang untuk memperbarui.",
                action: ToastAction::Reload,
                action_label: "Muat ulang",
            }),
            ToastAction::Acknowledge => Some(ToastModel {
                message: "Aplikasi siap digunakan secara offline.",
                action: ToastAction::Acknowledge,
                action_label: "OK",
            }),
        }
    }

    /// Runtime signal forwarded into the badge state
    pub fn on_runtime_event(state: &AppState, event: UpdateEvent) {
        state.apply_update_event(event);
    }

    /// Close resets both flags; the worker stays registered
    pub fn close(&self, state: &AppState) {
        state.apply_update_event(UpdateEvent::Dismissed);
    }

    pub fn reload(&self, state: &AppState) {
        if !state.update_status.borrow().need_refresh() {
            return;
        }
        log::info!("⬆️ [UPDATE] Activating new version");
        state.apply_update_event(UpdateEvent::Activated);
        self.runtime.activate_new_version(true);
    }

    /// Primary toast button
    pub fn act(&self, state: &AppState, action: ToastAction) {
        match action {
            ToastAction::Reload => self.reload(state),
            ToastAction::Acknowledge => self.close(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::services::SessionStore;
    use crate::state::SessionContext;
    use crate::utils::MemoryStorage;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingRuntime {
        activations: RefCell<Vec<bool>>,
    }

    impl WorkerRuntime for RecordingRuntime {
        fn activate_new_version(&self, reload_pages: bool) {
            self.activations.borrow_mut().push(reload_pages);
        }
    }

    fn setup() -> (AppState, Rc<RecordingRuntime>, UpdateViewModel) {
        let session = SessionContext::new(SessionStore::new(Rc::new(MemoryStorage::new())));
        let state = AppState::new(AppConfig::default(), session);
        let runtime = Rc::new(RecordingRuntime::default());
        let vm = UpdateViewModel::new(runtime.clone());
        (state, runtime, vm)
    }

    #[test]
    fn no_flags_no_toast() {
        assert_eq!(UpdateViewModel::toast(UpdateStatus::from_flags(false, false)), None);
        assert!(UpdateViewModel::toast(UpdateStatus::from_flags(true, false)).is_some());
        assert!(UpdateViewModel::toast(UpdateStatus::from_flags(false, true)).is_some());
    }

    #[test]
    fn need_refresh_offers_reload_that_activates_with_reload() {
        let (state, runtime, vm) = setup();
        UpdateViewModel::on_runtime_event(&state, UpdateEvent::NeedRefresh);
        let toast = UpdateViewModel::toast(*state.update_status.borrow()).unwrap();
        assert_eq!(toast.action, ToastAction::Reload);

        vm.act(&state, toast.action);
        assert_eq!(*runtime.activations.borrow(), vec![true]);
        assert!(!state.update_status.borrow().toast_visible());
    }

    #[test]
    fn close_hides_toast_without_touching_the_worker() {
        let (state, runtime, vm) = setup();
        UpdateViewModel::on_runtime_event(&state, UpdateEvent::OfflineReady);
        assert_eq!(
            UpdateViewModel::toast(*state.update_status.borrow()).map(|t| t.action),
            Some(ToastAction::Acknowledge)
        );

        vm.close(&state);
        let status = *state.update_status.borrow();
        assert!(!status.offline_ready() && !status.need_refresh());
        assert_eq!(UpdateViewModel::toast(status), None);
        assert!(runtime.activations.borrow().is_empty());
    }
}
