// ============================================================================
// SCREEN VIEW - Generic frame for every non-auth route
// ============================================================================
// Header with title + logout, navigation, then the rows produced by the
// content viewmodel. Styling lives in the stylesheet.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{input_value, on_click, on_submit, text_input, ElementBuilder};
use crate::models::{Program, UserProfile};
use crate::router::Route;
use crate::services::AuthService;
use crate::state::app_state::AppState;
use crate::viewmodels::{ContentRow, ContentViewModel, ScreenContent, SessionViewModel};
use crate::views::auth::{field, profile_fields, read_profile_update, render_error, submit_button};

const NAV: [(&str, Route); 5] = [
    ("Beranda", Route::Dashboard),
    ("Program", Route::Programs),
    ("Pengajuan", Route::Applications),
    ("Notifikasi", Route::Notifications),
    ("Berita", Route::News),
];

pub fn render_screen(state: &AppState) -> Result<Element, JsValue> {
    let route = state.current_route();

    let screen = ElementBuilder::new("div")?
        .class("screen")
        .child(render_header(state, &route)?)?;

    let mut body = ElementBuilder::new("main")?.class("screen__body");
    if let Some(error) = render_error(state)? {
        body = body.child(error)?;
    }
    if *state.loading.borrow() {
        body = body.child(ElementBuilder::new("p")?.class("screen__loading").text("Memuat...").build())?;
    }

    match &route {
        Route::Home => {
            body = body.child(render_home(state)?)?;
        }
        Route::NotFound => {
            body = body.child(
                ElementBuilder::new("p")?
                    .text("Halaman yang Anda cari tidak ditemukan.")
                    .build(),
            )?;
        }
        _ => {}
    }

    if let Some(content) = state.content.borrow().as_ref() {
        body = body.child(render_rows(state, &content.rows(), &content.unread_ids())?)?;
        if let (Route::ProgramApply(_), ScreenContent::Program(program)) = (&route, content) {
            body = body.child(render_apply_form(state, program.clone())?)?;
        }
        if let ScreenContent::Profile(profile) = content {
            body = body.child(render_profile_form(state, profile)?)?;
        }
        if matches!(content, ScreenContent::Notifications(list) if list.iter().any(|n| !n.read)) {
            body = body.child(render_mark_all_read(state)?)?;
        }
    }

    Ok(screen.child(body.build())?.build())
}

fn render_header(state: &AppState, route: &Route) -> Result<Element, JsValue> {
    let mut header = ElementBuilder::new("header")?
        .class("screen__header")
        .child(ElementBuilder::new("h1")?.text(route.title()).build())?;

    if state.session.is_authenticated() {
        let mut nav = ElementBuilder::new("nav")?.class("screen__nav");
        for (label, target) in NAV.iter() {
            nav = nav.child(nav_link(label, target.clone(), target == route)?)?;
        }
        header = header.child(nav.build())?;

        let logout = ElementBuilder::new("button")?
            .class("btn btn-secondary")
            .attr("type", "button")?
            .text("Keluar")
            .build();
        let state_logout = state.clone();
        on_click(&logout, move |_| {
            let vm = SessionViewModel::new(
                AuthService::new(state_logout.api_client()),
                state_logout.session.clone(),
            );
            spawn_local(async move {
                if let Err(e) = vm.logout().await {
                    log::error!("❌ [SESSION] Could not clear session: {}", e);
                }
                crate::navigate(Route::Login);
            });
        })?;
        header = header.child(logout)?;
    }
    Ok(header.build())
}

fn nav_link(label: &str, route: Route, active: bool) -> Result<Element, JsValue> {
    let link = ElementBuilder::new("a")?
        .class(if active { "nav-link nav-link--active" } else { "nav-link" })
        .attr("href", &route.to_path())?
        .text(label)
        .build();
    on_click(&link, move |event| {
        event.prevent_default();
        crate::navigate(route.clone());
    })?;
    Ok(link)
}

fn render_home(state: &AppState) -> Result<Element, JsValue> {
    let (label, target) = if state.session.is_authenticated() {
        ("Buka beranda", Route::Dashboard)
    } else {
        ("Masuk", Route::Login)
    };
    Ok(ElementBuilder::new("section")?
        .class("home")
        .child(
            ElementBuilder::new("p")?
                .text("Pelatihan, sertifikasi, dan pendanaan untuk UMKM dalam satu aplikasi.")
                .build(),
        )?
        .child(nav_link(label, target, false)?)?
        .child(nav_link("Berita terbaru", Route::News, false)?)?
        .build())
}

fn render_rows(
    state: &AppState,
    rows: &[ContentRow],
    unread_ids: &[Option<String>],
) -> Result<Element, JsValue> {
    let mut list = ElementBuilder::new("ul")?.class("content-list");
    if rows.is_empty() {
        list = list.child(ElementBuilder::new("li")?.class("content-list__empty").text("Belum ada data.").build())?;
    }
    for (index, row) in rows.iter().enumerate() {
        let mut item = ElementBuilder::new("li")?
            .class("content-list__item")
            .child(ElementBuilder::new("strong")?.text(&row.title).build())?;
        if let Some(subtitle) = &row.subtitle {
            item = item.child(ElementBuilder::new("span")?.text(subtitle).build())?;
        }
        let item = item.build();
        let unread = unread_ids.get(index).cloned().flatten();
        if let Some(route) = &row.link {
            item.set_attribute("data-href", &route.to_path())?;
        }
        if row.link.is_some() || unread.is_some() {
            let link = row.link.clone();
            let state = state.clone();
            on_click(&item, move |_| open_row(&state, link.clone(), unread.clone()))?;
        }
        list = list.child(item)?;
    }
    Ok(list.build())
}

/// Follow the row link; an unread notification is marked read first
fn open_row(state: &AppState, link: Option<Route>, unread: Option<String>) {
    let Some(notification_id) = unread else {
        if let Some(route) = link {
            crate::navigate(route);
        }
        return;
    };
    let vm = ContentViewModel::new(state.api_client(), state.session.clone());
    spawn_local(async move {
        if let Err(e) = vm.mark_read(&notification_id).await {
            log::warn!("⚠️ [NOTIFICATION] Could not mark {} read: {}", notification_id, e);
        }
        match link {
            Some(route) => crate::navigate(route),
            None => crate::reload_content(),
        }
    });
}

fn document_input_id(index: usize) -> String {
    format!("apply-document-{}", index)
}

fn render_apply_form(state: &AppState, program: Program) -> Result<Element, JsValue> {
    let motivation_input = ElementBuilder::new("input")?
        .class("form-input")
        .id("apply-motivation")?
        .attr("type", "text")?
        .attr("placeholder", "Ceritakan usaha Anda")?
        .build();
    let mut form = ElementBuilder::new("form")?
        .class("apply-form")
        .child(motivation_input)?;
    for (index, name) in program.required_documents.iter().enumerate() {
        let input = text_input(&document_input_id(index), "url", "Tautan dokumen (https://...)")?;
        form = form.child(field(name, input)?)?;
    }
    let form = form.child(submit_button(state, "Kirim pengajuan")?)?.build();

    let state_submit = state.clone();
    on_submit(&form, move || {
        if *state_submit.loading.borrow() {
            return;
        }
        let motivation = input_value("apply-motivation");
        let links: Vec<String> = (0..program.required_documents.len())
            .map(|index| input_value(&document_input_id(index)))
            .collect();
        let documents = ContentViewModel::document_links(&program.required_documents, &links);
        let vm = ContentViewModel::new(state_submit.api_client(), state_submit.session.clone());
        let program = program.clone();
        let state = state_submit.clone();
        state.set_loading(true);
        spawn_local(async move {
            match vm.submit_application(&program, &motivation, documents).await {
                Ok(application) => {
                    state.set_loading(false);
                    crate::navigate(Route::ApplicationDetail(application.id));
                }
                Err(e) => state.set_error(Some(e.user_message())),
            }
        });
    })?;
    Ok(form)
}

fn render_profile_form(state: &AppState, profile: &UserProfile) -> Result<Element, JsValue> {
    let mut form = ElementBuilder::new("form")?.class("profile-form");
    for input in profile_fields(Some(profile))? {
        form = form.child(input)?;
    }
    let form = form.child(submit_button(state, "Simpan perubahan")?)?.build();

    let state_submit = state.clone();
    on_submit(&form, move || {
        if *state_submit.loading.borrow() {
            return;
        }
        let update = read_profile_update();
        let vm = ContentViewModel::new(state_submit.api_client(), state_submit.session.clone());
        let state = state_submit.clone();
        state.set_loading(true);
        spawn_local(async move {
            match vm.update_profile(&update).await {
                Ok(content) => {
                    state.set_error(None);
                    state.set_content(Some(content));
                }
                Err(e) => state.set_error(Some(e.user_message())),
            }
        });
    })?;
    Ok(form)
}

fn render_mark_all_read(state: &AppState) -> Result<Element, JsValue> {
    let button = ElementBuilder::new("button")?
        .class("btn btn-link")
        .attr("type", "button")?
        .text("Tandai semua sudah dibaca")
        .build();
    let state_click = state.clone();
    on_click(&button, move |_| {
        let vm = ContentViewModel::new(state_click.api_client(), state_click.session.clone());
        let state = state_click.clone();
        spawn_local(async move {
            match vm.mark_all_read().await {
                Ok(()) => crate::reload_content(),
                Err(e) => state.set_error(Some(e.user_message())),
            }
        });
    })?;
    Ok(button)
}
