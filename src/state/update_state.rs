// ============================================================================
// UPDATE STATE - {Idle, OfflineReady, UpdateAvailable}
// ============================================================================
// Mirrors the two flags raised by the service-worker runtime
// (offline_ready, need_refresh) as one state.
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateStatus {
    #[default]
    Idle,
    /// First install finished, the app works offline
    OfflineReady,
    /// A new worker is waiting to take over
    UpdateAvailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateEvent {
    OfflineReady,
    NeedRefresh,
    /// User closed the toast
    Dismissed,
    /// User asked for the new version
    Activated,
}

/// Action offered by the toast
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastAction {
    Reload,
    Acknowledge,
}

impl UpdateStatus {
    /// `need_refresh` takes precedence when both flags are up
    pub fn from_flags(offline_ready: bool, need_refresh: bool) -> Self {
        if need_refresh {
            UpdateStatus::UpdateAvailable
        } else if offline_ready {
            UpdateStatus::OfflineReady
        } else {
            UpdateStatus::Idle
        }
    }

    pub fn offline_ready(self) -> bool {
        self == UpdateStatus::OfflineReady
    }

    pub fn need_refresh(self) -> bool {
        self == UpdateStatus::UpdateAvailable
    }

    pub fn transition(self, event: UpdateEvent) -> Self {
        match (self, event) {
            (_, UpdateEvent::Dismissed) | (_, UpdateEvent::Activated) => UpdateStatus::Idle,
            (_, UpdateEvent::NeedRefresh) => UpdateStatus::UpdateAvailable,
            // a pending new version outranks the offline notice
            (UpdateStatus::UpdateAvailable, UpdateEvent::OfflineReady) => {
                UpdateStatus::UpdateAvailable
            }
            (_, UpdateEvent::OfflineReady) => UpdateStatus::OfflineReady,
        }
    }

    pub fn toast_visible(self) -> bool {
        self != UpdateStatus::Idle
    }

    pub fn toast_action(self) -> Option<ToastAction> {
        match self {
            UpdateStatus::Idle => None,
            UpdateStatus::OfflineReady => Some(ToastAction::Acknowledge),
            UpdateStatus::UpdateAvailable => Some(ToastAction::Reload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_states() {
        assert_eq!(UpdateStatus::from_flags(false, false), UpdateStatus::Idle);
        assert_eq!(UpdateStatus::from_flags(true, false), UpdateStatus::OfflineReady);
        assert_eq!(UpdateStatus::from_flags(false, true), UpdateStatus::UpdateAvailable);
        assert_eq!(UpdateStatus::from_flags(true, true), UpdateStatus::UpdateAvailable);
    }

    #[test]
    fn visibility_follows_either_flag() {
        for (offline_ready, need_refresh) in [(false, false), (true, false), (false, true)] {
            let status = UpdateStatus::from_flags(offline_ready, need_refresh);
            assert_eq!(status.toast_visible(), offline_ready || need_refresh);
        }
    }

    #[test]
    fn dismiss_resets_both_flags() {
        for start in [
            UpdateStatus::Idle,
            UpdateStatus::OfflineReady,
            UpdateStatus::UpdateAvailable,
        ] {
            let after = start.transition(UpdateEvent::Dismissed);
            assert!(!after.offline_ready());
            assert!(!after.need_refresh());
            assert!(!after.toast_visible());
        }
    }

    #[test]
    fn offline_ready_does_not_hide_pending_update() {
        let status = UpdateStatus::UpdateAvailable.transition(UpdateEvent::OfflineReady);
        assert_eq!(status.toast_action(), Some(ToastAction::Reload));
        let status = UpdateStatus::OfflineReady.transition(UpdateEvent::NeedRefresh);
        assert_eq!(status, UpdateStatus::UpdateAvailable);
    }
}
