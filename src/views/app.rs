// ============================================================================
// APP VIEW - Root layout
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::router::Route;
use crate::state::app_state::AppState;
use crate::viewmodels::UpdateViewModel;
use crate::views::auth::{render_complete_profile, render_login, render_register, render_verify_otp};
use crate::views::network_banner::render_network_banner;
use crate::views::screen::render_screen;
use crate::views::update_toast::render_update_toast;

pub fn render_app(state: &AppState, update_vm: &Rc<UpdateViewModel>) -> Result<Element, JsValue> {
    let mut container = ElementBuilder::new("div")?.class("app-container");

    if let Some(banner) = render_network_banner(state)? {
        container = container.child(banner)?;
    }

    let screen = match state.current_route() {
        Route::Login => render_login(state)?,
        Route::Register => render_register(state)?,
        Route::VerifyOtp => render_verify_otp(state)?,
        Route::CompleteProfile => render_complete_profile(state)?,
        _ => render_screen(state)?,
    };
    container = container.child(screen)?;

    if let Some(toast) = render_update_toast(state, update_vm)? {
        container = container.child(toast)?;
    }

    Ok(container.build())
}
