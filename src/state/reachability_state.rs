// ============================================================================
// REACHABILITY STATE - {Unknown, Online, Offline} + connectivity banner
// ============================================================================
// Driven only by the browser's online/offline signal. The banner is advisory:
// it never blocks or queues requests.
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reachability {
    Unknown,
    Online,
    Offline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectivityEvent {
    WentOnline,
    WentOffline,
}

/// Which banner variant is on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    /// Warning: connection lost
    Offline,
    /// Confirmation: connection is back
    Restored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReachabilityState {
    reachability: Reachability,
    banner: Option<BannerKind>,
}

impl ReachabilityState {
    pub fn new() -> Self {
        Self {
            reachability: Reachability::Unknown,
            banner: None,
        }
    }

    /// Seed from `navigator.onLine` read at mount.
    /// Offline at mount shows the warning right away.
    pub fn seeded(on_line: Option<bool>) -> Self {
        match on_line {
            Some(true) => Self {
                reachability: Reachability::Online,
                banner: None,
            },
            Some(false) => Self {
                reachability: Reachability::Offline,
                banner: Some(BannerKind::Offline),
            },
            None => Self::new(),
        }
    }

    /// Apply a browser event. Returns true when anything changed.
    /// Repeated events in the same direction are not transitions and keep a
    /// dismissed banner dismissed.
    pub fn apply(&mut self, event: ConnectivityEvent) -> bool {
        let next = match (self.reachability, event) {
            (Reachability::Offline, ConnectivityEvent::WentOffline) => return false,
            (Reachability::Online, ConnectivityEvent::WentOnline) => return false,
            (_, ConnectivityEvent::WentOffline) => Self {
                reachability: Reachability::Offline,
                banner: Some(BannerKind::Offline),
            },
            (Reachability::Offline, ConnectivityEvent::WentOnline) => Self {
                reachability: Reachability::Online,
                banner: Some(BannerKind::Restored),
            },
            // Unknown -> Online: nothing was lost, nothing to confirm
            (_, ConnectivityEvent::WentOnline) => Self {
                reachability: Reachability::Online,
                banner: self.banner,
            },
        };
        let changed = next != *self;
        *self = next;
        changed
    }

    /// Hide the banner whatever the connectivity is
    pub fn dismiss(&mut self) -> bool {
        self.banner.take().is_some()
    }

    pub fn reachability(&self) -> Reachability {
        self.reachability
    }

    /// Unknown counts as online: nothing says otherwise
    pub fn is_online(&self) -> bool {
        self.reachability != Reachability::Offline
    }

    pub fn banner(&self) -> Option<BannerKind> {
        self.banner
    }

    pub fn banner_visible(&self) -> bool {
        self.banner.is_some()
    }
}

impl Default for ReachabilityState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_at_mount_shows_warning_immediately() {
        let state = ReachabilityState::seeded(Some(false));
        assert!(!state.is_online());
        assert_eq!(state.banner(), Some(BannerKind::Offline));
    }

    #[test]
    fn online_at_mount_shows_nothing() {
        let state = ReachabilityState::seeded(Some(true));
        assert!(state.is_online());
        assert!(!state.banner_visible());
    }

    #[test]
    fn offline_then_online_switches_to_confirmation() {
        let mut state = ReachabilityState::seeded(Some(true));
        assert!(state.apply(ConnectivityEvent::WentOffline));
        assert_eq!(state.banner(), Some(BannerKind::Offline));
        assert!(state.apply(ConnectivityEvent::WentOnline));
        assert!(state.is_online());
        assert_eq!(state.banner(), Some(BannerKind::Restored));
    }

    #[test]
    fn dismiss_is_independent_of_connectivity_and_sticky_until_transition() {
        let mut state = ReachabilityState::seeded(Some(false));
        assert!(state.dismiss());
        assert!(!state.is_online());
        assert!(!state.banner_visible());

        // duplicate offline event: not a transition
        assert!(!state.apply(ConnectivityEvent::WentOffline));
        assert!(!state.banner_visible());

        // next real transition brings it back
        state.apply(ConnectivityEvent::WentOnline);
        assert_eq!(state.banner(), Some(BannerKind::Restored));
    }

    /// Banner is a pure function of (is_online, dismissed since last
    /// transition, any transition seen yet), for every event sequence.
    #[test]
    fn banner_is_pure_function_of_online_and_dismissal() {
        // xorshift for a deterministic spread of sequences
        let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        for _ in 0..200 {
            let start_online = next() % 2 == 0;
            let mut state = ReachabilityState::seeded(Some(start_online));
            let mut transitioned = !start_online;
            let mut dismissed = false;

            for _ in 0..30 {
                match next() % 3 {
                    0 => {
                        if state.apply(ConnectivityEvent::WentOffline) {
                            transitioned = true;
                            dismissed = false;
                        }
                    }
                    1 => {
                        if state.apply(ConnectivityEvent::WentOnline) {
                            transitioned = true;
                            dismissed = false;
                        }
                    }
                    _ => {
                        state.dismiss();
                        dismissed = true;
                    }
                }

                let expected = if dismissed || !transitioned {
                    None
                } else if state.is_online() {
                    Some(BannerKind::Restored)
                } else {
                    Some(BannerKind::Offline)
                };
                assert_eq!(state.banner(), expected);
            }
        }
    }
}
