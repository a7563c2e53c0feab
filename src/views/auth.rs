// ============================================================================
// AUTH VIEWS - Login, register, OTP, profile completion
// ============================================================================

use std::future::Future;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{input_value, on_click, on_submit, text_input, ElementBuilder};
use crate::error::ApiError;
use crate::models::{ProfileUpdate, RegisterRequest, UserProfile};
use crate::router::Route;
use crate::services::AuthService;
use crate::state::app_state::AppState;
use crate::viewmodels::{LoginOutcome, SessionViewModel};

/// Run a session flow off the click handler and route on success
fn run_session_action<F, Fut>(state: &AppState, action: F)
where
    F: FnOnce(SessionViewModel) -> Fut + 'static,
    Fut: Future<Output = Result<LoginOutcome, ApiError>> + 'static,
{
    if *state.loading.borrow() {
        return;
    }
    state.set_loading(true);
    let vm = SessionViewModel::new(AuthService::new(state.api_client()), state.session.clone());
    let state = state.clone();
    spawn_local(async move {
        match action(vm).await {
            Ok(outcome) => {
                log::info!("✅ [AUTH] {:?}", outcome);
                state.set_loading(false);
                crate::navigate(outcome.next_route());
            }
            Err(e) => {
                log::warn!("⚠️ [AUTH] {}", e);
                state.set_error(Some(e.user_message()));
            }
        }
    });
}

pub(crate) fn field(label: &str, input: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("label")?
        .class("form-field")
        .child(ElementBuilder::new("span")?.text(label).build())?
        .child(input)?
        .build())
}

pub(crate) fn submit_button(state: &AppState, label: &str) -> Result<Element, JsValue> {
    let text = if *state.loading.borrow() { "Memproses..." } else { label };
    let button = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text(text)
        .build();
    if *state.loading.borrow() {
        button.set_attribute("disabled", "true")?;
    }
    Ok(button)
}

pub fn render_error(state: &AppState) -> Result<Option<Element>, JsValue> {
    let Some(message) = state.error_message.borrow().clone() else {
        return Ok(None);
    };
    Ok(Some(
        ElementBuilder::new("p")?
            .class("form-error")
            .attr("role", "alert")?
            .text(&message)
            .build(),
    ))
}

fn link_to(label: &str, route: Route) -> Result<Element, JsValue> {
    let link = ElementBuilder::new("a")?
        .class("auth-link")
        .attr("href", &route.to_path())?
        .text(label)
        .build();
    on_click(&link, move |event| {
        event.prevent_default();
        crate::navigate(route.clone());
    })?;
    Ok(link)
}

fn auth_card(title: &str, form: Element, footer: Option<Element>) -> Result<Element, JsValue> {
    let mut card = ElementBuilder::new("div")?
        .class("auth-card")
        .child(ElementBuilder::new("h1")?.class("auth-title").text(title).build())?
        .child(form)?;
    if let Some(footer) = footer {
        card = card.child(footer)?;
    }
    Ok(ElementBuilder::new("div")?.class("auth-screen").child(card.build())?.build())
}

fn form_with(state: &AppState, fields: Vec<Element>, submit_label: &str) -> Result<Element, JsValue> {
    let mut form = ElementBuilder::new("form")?.class("auth-form");
    for f in fields {
        form = form.child(f)?;
    }
    if let Some(error) = render_error(state)? {
        form = form.child(error)?;
    }
    Ok(form.child(submit_button(state, submit_label)?)?.build())
}

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let form = form_with(
        state,
        vec![
            field(
                "Email atau No. HP",
                text_input("login-identifier", "text", "nama@email.com / 0812...")?,
            )?,
            field("Password", text_input("login-password", "password", "••••••••")?)?,
        ],
        "Masuk",
    )?;

    let state_submit = state.clone();
    on_submit(&form, move || {
        let identifier = input_value("login-identifier");
        let password = input_value("login-password");
        run_session_action(&state_submit, move |vm| async move {
            vm.login(&identifier, &password).await
        });
    })?;

    auth_card("Masuk", form, Some(link_to("Belum punya akun? Daftar", Route::Register)?))
}

pub fn render_register(state: &AppState) -> Result<Element, JsValue> {
    let form = form_with(
        state,
        vec![
            field("Nama", text_input("register-name", "text", "Nama lengkap")?)?,
            field("Email", text_input("register-email", "email", "nama@email.com")?)?,
            field("No. HP", text_input("register-phone", "tel", "0812...")?)?,
            field("Password", text_input("register-password", "password", "Minimal 8 karakter")?)?,
        ],
        "Daftar",
    )?;

    let state_submit = state.clone();
    on_submit(&form, move || {
        let request = RegisterRequest {
            name: input_value("register-name").trim().to_string(),
            email: input_value("register-email").trim().to_string(),
            phone: input_value("register-phone").trim().to_string(),
            password: input_value("register-password"),
        };
        run_session_action(&state_submit, move |vm| async move { vm.register(&request).await });
    })?;

    auth_card("Daftar", form, Some(link_to("Sudah punya akun? Masuk", Route::Login)?))
}

pub fn render_verify_otp(state: &AppState) -> Result<Element, JsValue> {
    let pending = state.session.store().pending();
    let target = pending
        .phone
        .or(pending.email)
        .unwrap_or_else(|| "kontak Anda".to_string());

    let form = form_with(
        state,
        vec![
            ElementBuilder::new("p")?
                .class("auth-hint")
                .text(&format!("Kode OTP telah dikirim ke {}", target))
                .build(),
            field("Kode OTP", text_input("otp-code", "text", "123456")?)?,
        ],
        "Verifikasi",
    )?;

    let state_submit = state.clone();
    on_submit(&form, move || {
        let otp = input_value("otp-code");
        run_session_action(&state_submit, move |vm| async move { vm.verify_otp(&otp).await });
    })?;

    let resend = ElementBuilder::new("button")?
        .class("btn btn-link")
        .attr("type", "button")?
        .text("Kirim ulang kode")
        .build();
    let state_resend = state.clone();
    on_click(&resend, move |_| {
        let vm = SessionViewModel::new(
            AuthService::new(state_resend.api_client()),
            state_resend.session.clone(),
        );
        let state = state_resend.clone();
        spawn_local(async move {
            match vm.resend_otp().await {
                Ok(()) => log::info!("📨 [AUTH] OTP resent"),
                Err(e) => state.set_error(Some(e.user_message())),
            }
        });
    })?;

    auth_card("Verifikasi OTP", form, Some(resend))
}

/// Profile inputs, prefilled from `profile` when editing
pub(crate) fn profile_fields(profile: Option<&UserProfile>) -> Result<Vec<Element>, JsValue> {
    let name = text_input("profile-name", "text", "")?;
    let business = text_input("profile-business", "text", "")?;
    if let Some(profile) = profile {
        name.set_attribute("value", &profile.name)?;
        if let Some(business_name) = &profile.business_name {
            business.set_attribute("value", business_name)?;
        }
    }
    Ok(vec![
        field("Nama lengkap (sesuai KTP)", name)?,
        field("NIK", text_input("profile-nik", "text", "16 digit")?)?,
        field("Nama usaha", business)?,
        field("Sektor usaha", text_input("profile-sector", "text", "Kuliner, fesyen, ...")?)?,
        field("Alamat usaha", text_input("profile-address", "text", "")?)?,
    ])
}

pub(crate) fn read_profile_update() -> ProfileUpdate {
    let optional = |id: &str| Some(input_value(id).trim().to_string()).filter(|v| !v.is_empty());
    ProfileUpdate {
        full_name: input_value("profile-name").trim().to_string(),
        nik: input_value("profile-nik").trim().to_string(),
        business_name: input_value("profile-business").trim().to_string(),
        business_sector: optional("profile-sector"),
        address: optional("profile-address"),
    }
}

pub fn render_complete_profile(state: &AppState) -> Result<Element, JsValue> {
    let form = form_with(state, profile_fields(None)?, "Simpan")?;

    let state_submit = state.clone();
    on_submit(&form, move || {
        let update = read_profile_update();
        run_session_action(&state_submit, move |vm| async move {
            vm.complete_profile(&update).await
        });
    })?;

    auth_card("Lengkapi Profil", form, None)
}
