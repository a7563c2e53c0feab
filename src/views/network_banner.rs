// ============================================================================
// NETWORK BANNER VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::state::app_state::AppState;
use crate::viewmodels::NetworkViewModel;

/// `None` when the banner is hidden
pub fn render_network_banner(state: &AppState) -> Result<Option<Element>, JsValue> {
    let Some(model) = NetworkViewModel::banner(&state.reachability.borrow()) else {
        return Ok(None);
    };

    let close = ElementBuilder::new("button")?
        .class("network-banner__close")
        .attr("type", "button")?
        .attr("aria-label", "Tutup")?
        .text("✕")
        .build();
    let state_close = state.clone();
    on_click(&close, move |_| NetworkViewModel::dismiss(&state_close))?;

    let banner = ElementBuilder::new("div")?
        .class(model.css_class)
        .attr("role", "status")?
        .child(ElementBuilder::new("span")?.text(model.message).build())?
        .child(close)?
        .build();
    Ok(Some(banner))
}
