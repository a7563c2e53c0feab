// ============================================================================
// NETWORK VIEWMODEL - Connectivity banner
// ============================================================================

use crate::state::{AppState, BannerKind, ConnectivityEvent, ReachabilityState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BannerModel {
    pub kind: BannerKind,
    pub message: &'static str,
    pub css_class: &'static str,
}

pub struct NetworkViewModel;

impl NetworkViewModel {
    /// What the banner shows for a state, `None` when hidden
    pub fn banner(state: &ReachabilityState) -> Option<BannerModel> {
        state.banner().map(|kind| match kind {
            BannerKind::Offline => BannerModel {
                kind,
                message: "Anda sedang offline. Beberapa fitur mungkin tidak tersedia.",
                css_class: "network-banner network-banner--offline",
            },
            BannerKind::Restored => BannerModel {
                kind,
                message: "Koneksi internet kembali tersambung.",
                css_class: "network-banner network-banner--online",
            },
        })
    }

    pub fn on_event(state: &AppState, event: ConnectivityEvent) {
        state.apply_connectivity(event);
    }

    pub fn dismiss(state: &AppState) {
        state.dismiss_banner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_then_online_switches_banner_text() {
        let mut state = ReachabilityState::seeded(Some(true));
        assert_eq!(NetworkViewModel::banner(&state), None);

        state.apply(ConnectivityEvent::WentOffline);
        let banner = NetworkViewModel::banner(&state).unwrap();
        assert_eq!(banner.kind, BannerKind::Offline);

        state.apply(ConnectivityEvent::WentOnline);
        let banner = NetworkViewModel::banner(&state).unwrap();
        assert_eq!(banner.message, "Koneksi internet kembali tersambung.");

        state.dismiss();
        assert_eq!(NetworkViewModel::banner(&state), None);
    }
}
