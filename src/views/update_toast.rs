// ============================================================================
// UPDATE TOAST VIEW - New version / offline ready
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::state::app_state::AppState;
use crate::state::ToastAction;
use crate::viewmodels::UpdateViewModel;

pub fn render_update_toast(
    state: &AppState,
    vm: &Rc<UpdateViewModel>,
) -> Result<Option<Element>, JsValue> {
    let Some(model) = UpdateViewModel::toast(*state.update_status.borrow()) else {
        return Ok(None);
    };

    let action = ElementBuilder::new("button")?
        .class("update-toast__action")
        .attr("type", "button")?
        .text(model.action_label)
        .build();
    {
        let state = state.clone();
        let vm = vm.clone();
        let kind = model.action;
        on_click(&action, move |_| vm.act(&state, kind))?;
    }

    let toast = ElementBuilder::new("div")?
        .class("update-toast")
        .attr("role", "alert")?
        .child(ElementBuilder::new("p")?.class("update-toast__message").text(model.message).build())?
        .child(action)?;

    // acknowledge already closes; reload gets an extra close button
    let toast = if model.action == ToastAction::Reload {
        let close = ElementBuilder::new("button")?
            .class("update-toast__close")
            .attr("type", "button")?
            .text("Tutup")
            .build();
        let state = state.clone();
        let vm = vm.clone();
        on_click(&close, move |_| vm.close(&state))?;
        toast.child(close)?
    } else {
        toast
    };

    Ok(Some(toast.build()))
}
