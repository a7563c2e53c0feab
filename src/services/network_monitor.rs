// ============================================================================
// NETWORK MONITOR - Browser online/offline signal
// ============================================================================
// Reads navigator.onLine once at mount and forwards every window
// online/offline event. Listeners are registered once and removed on stop
// or drop, so remounting never stacks handlers.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Event};

use crate::state::ConnectivityEvent;

type Listener = Closure<dyn FnMut(Event)>;

pub struct NetworkMonitor {
    listeners: RefCell<Option<(Listener, Listener)>>,
}

impl NetworkMonitor {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(None),
        }
    }

    /// `navigator.onLine` right now, `None` outside a browser
    pub fn current_on_line() -> Option<bool> {
        window().map(|w| w.navigator().on_line())
    }

    pub fn is_monitoring(&self) -> bool {
        self.listeners.borrow().is_some()
    }

    /// Register the window listeners. A second call is ignored.
    pub fn start_monitoring<F>(&self, callback: F) -> Result<(), JsValue>
    where
        F: Fn(ConnectivityEvent) + 'static,
    {
        if self.is_monitoring() {
            log::warn!("⚠️ [NETWORK] start_monitoring called twice, ignoring");
            return Ok(());
        }

        let window = window().ok_or_else(|| JsValue::from_str("No window"))?;
        let callback = Rc::new(callback);

        let online = Closure::wrap(Box::new({
            let callback = callback.clone();
            move |_event: Event| {
                log::info!("🌐 [NETWORK] online");
                callback(ConnectivityEvent::WentOnline);
            }
        }) as Box<dyn FnMut(Event)>);

        let offline = Closure::wrap(Box::new({
            let callback = callback.clone();
            move |_event: Event| {
                log::warn!("📴 [NETWORK] offline");
                callback(ConnectivityEvent::WentOffline);
            }
        }) as Box<dyn FnMut(Event)>);

        window.add_event_listener_with_callback("online", online.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback("offline", offline.as_ref().unchecked_ref())?;

        *self.listeners.borrow_mut() = Some((online, offline));
        log::info!("✅ [NETWORK] Listeners registered");
        Ok(())
    }

    /// Remove the listeners; safe to call when not monitoring
    pub fn stop_monitoring(&self) {
        let Some((online, offline)) = self.listeners.borrow_mut().take() else {
            return;
        };
        if let Some(window) = window() {
            let _ = window
                .remove_event_listener_with_callback("online", online.as_ref().unchecked_ref());
            let _ = window
                .remove_event_listener_with_callback("offline", offline.as_ref().unchecked_ref());
        }
        log::info!("🔌 [NETWORK] Listeners removed");
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NetworkMonitor {
    fn drop(&mut self) {
        self.stop_monitoring();
    }
}
