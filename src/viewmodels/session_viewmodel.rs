// ============================================================================
// SESSION VIEWMODEL - Login, registration, OTP, profile completion, logout
// ============================================================================
// Business logic only: returns outcomes, app.rs turns them into navigation.
// Everything that reaches the session store goes through here.
// ============================================================================

use crate::error::ApiError;
use crate::models::{
    AuthPayload, Identifier, LoginRequest, PendingVerification, ProfileUpdate, RegisterRequest,
    ResendOtpRequest, VerifyOtpRequest,
};
use crate::router::Route;
use crate::services::AuthService;
use crate::state::SessionContext;

/// Where a successful auth step leaves the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated,
    NeedsOtp,
    NeedsProfile,
}

impl LoginOutcome {
    pub fn next_route(&self) -> Route {
        match self {
            LoginOutcome::Authenticated => Route::Dashboard,
            LoginOutcome::NeedsOtp => Route::VerifyOtp,
            LoginOutcome::NeedsProfile => Route::CompleteProfile,
        }
    }
}

pub struct SessionViewModel {
    auth: AuthService,
    session: SessionContext,
}

impl SessionViewModel {
    pub fn new(auth: AuthService, session: SessionContext) -> Self {
        Self { auth, session }
    }

    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let identifier = Identifier::parse(identifier).ok_or_else(|| invalid(
            "Masukkan email atau nomor HP yang valid",
        ))?;
        if password.is_empty() {
            return Err(invalid("Password wajib diisi"));
        }

        let payload = self
            .auth
            .login(&LoginRequest {
                identifier: identifier.as_str().to_string(),
                password: password.to_string(),
            })
            .await?;
        settle(&self.session, payload, Some(&identifier))
    }

    /// Account created; the OTP screen comes next
    pub async fn register(&self, request: &RegisterRequest) -> Result<LoginOutcome, ApiError> {
        if request.password.len() < 8 {
            return Err(invalid("Password minimal 8 karakter"));
        }
        let payload = self.auth.register(request).await?;
        self.session.store().set_pending(&PendingVerification {
            temp_token: payload.temp_token,
            phone: Some(request.phone.clone()).filter(|p| !p.is_empty()),
            email: Some(request.email.clone()).filter(|e| !e.is_empty()),
        })?;
        log::info!("📝 [SESSION] Registration pending OTP");
        Ok(LoginOutcome::NeedsOtp)
    }

    pub async fn verify_otp(&self, otp: &str) -> Result<LoginOutcome, ApiError> {
        let otp = otp.trim();
        if otp.len() < 4 || !otp.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("Kode OTP tidak valid"));
        }
        let pending = self.session.store().pending();
        let payload = self
            .auth
            .verify_otp(&VerifyOtpRequest {
                phone: pending.phone.clone(),
                email: pending.email.clone(),
                otp: otp.to_string(),
            })
            .await?;
        // verified by construction, only the profile may still be missing
        settle_verified(&self.session, payload, &pending)
    }

    pub async fn resend_otp(&self) -> Result<(), ApiError> {
        let pending = self.session.store().pending();
        if pending.phone.is_none() && pending.email.is_none() {
            return Err(invalid("Data pendaftaran tidak ditemukan, silakan daftar ulang"));
        }
        self.auth
            .resend_otp(&ResendOtpRequest {
                phone: pending.phone,
                email: pending.email,
            })
            .await
    }

    pub async fn complete_profile(&self, update: &ProfileUpdate) -> Result<LoginOutcome, ApiError> {
        update.validate().map_err(|message| ApiError::Application {
            status_code: 422,
            message,
        })?;
        let temp_token = self
            .session
            .store()
            .temp_token()
            .or_else(|| self.session.token())
            .ok_or_else(|| ApiError::Unauthorized {
                message: "Sesi pendaftaran berakhir".to_string(),
            })?;

        let payload = self.auth.complete_profile(&temp_token, update).await?;
        let profile = payload.user.unwrap_or_default();
        self.session.begin(&payload.token, &profile)?;
        log::info!("✅ [SESSION] Profile completed");
        Ok(LoginOutcome::Authenticated)
    }

    /// Backend logout is best effort; the local session is always cleared
    pub async fn logout(&self) -> Result<(), ApiError> {
        if self.session.token().is_some() {
            if let Err(e) = self.auth.logout().await {
                log::warn!("⚠️ [SESSION] Backend logout failed: {}", e);
            }
        }
        self.session.end()?;
        Ok(())
    }
}

fn invalid(message: &str) -> ApiError {
    ApiError::Application {
        status_code: 422,
        message: message.to_string(),
    }
}

/// Persist whatever a login answer allows and say what comes next
pub fn settle(
    session: &SessionContext,
    payload: AuthPayload,
    identifier: Option<&Identifier>,
) -> Result<LoginOutcome, ApiError> {
    let Some(user) = payload.user else {
        session.begin(&payload.token, &Default::default())?;
        return Ok(LoginOutcome::Authenticated);
    };

    if !user.is_verified {
        let (phone, email) = match identifier {
            Some(Identifier::Phone(p)) => (Some(p.clone()), user.email.clone()),
            Some(Identifier::Email(e)) => (user.phone.clone(), Some(e.clone())),
            None => (user.phone.clone(), user.email.clone()),
        };
        session.store().set_pending(&PendingVerification {
            temp_token: Some(payload.token),
            phone,
            email,
        })?;
        return Ok(LoginOutcome::NeedsOtp);
    }

    if !user.profile_completed {
        session.store().set_pending(&PendingVerification {
            temp_token: Some(payload.token),
            phone: user.phone.clone(),
            email: user.email.clone(),
        })?;
        return Ok(LoginOutcome::NeedsProfile);
    }

    session.begin(&payload.token, &user)?;
    Ok(LoginOutcome::Authenticated)
}

fn settle_verified(
    session: &SessionContext,
    mut payload: AuthPayload,
    pending: &PendingVerification,
) -> Result<LoginOutcome, ApiError> {
    match payload.user.as_mut() {
        Some(user) => user.is_verified = true,
        None => {
            // no profile yet: keep the contact details for the completion form
            session.store().set_pending(&PendingVerification {
                temp_token: Some(payload.token),
                phone: pending.phone.clone(),
                email: pending.email.clone(),
            })?;
            return Ok(LoginOutcome::NeedsProfile);
        }
    }
    settle(session, payload, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use crate::services::{ApiClient, SessionStore};
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;
    use std::rc::Rc;

    fn session() -> SessionContext {
        SessionContext::with_clock(
            SessionStore::new(Rc::new(MemoryStorage::new())),
            Rc::new(|| 0),
        )
    }

    fn user(verified: bool, completed: bool) -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: "Sari".into(),
            phone: Some("081234567890".into()),
            is_verified: verified,
            profile_completed: completed,
            ..Default::default()
        }
    }

    fn payload(user: Option<UserProfile>) -> AuthPayload {
        AuthPayload {
            token: "tok".into(),
            user,
        }
    }

    #[test]
    fn complete_user_gets_a_session() {
        let ctx = session();
        let outcome = settle(&ctx, payload(Some(user(true, true))), None).unwrap();
        assert_eq!(outcome, LoginOutcome::Authenticated);
        assert_eq!(ctx.token().as_deref(), Some("tok"));
        assert_eq!(outcome.next_route(), Route::Dashboard);
    }

    #[test]
    fn unverified_user_goes_to_otp_with_temp_token() {
        let ctx = session();
        let id = Identifier::parse("sari@toko.id");
        let outcome = settle(&ctx, payload(Some(user(false, false))), id.as_ref()).unwrap();
        assert_eq!(outcome, LoginOutcome::NeedsOtp);
        assert_eq!(ctx.token(), None);
        let pending = ctx.store().pending();
        assert_eq!(pending.temp_token.as_deref(), Some("tok"));
        assert_eq!(pending.email.as_deref(), Some("sari@toko.id"));
        assert_eq!(pending.phone.as_deref(), Some("081234567890"));
    }

    #[test]
    fn incomplete_profile_goes_to_completion() {
        let ctx = session();
        let outcome = settle(&ctx, payload(Some(user(true, false))), None).unwrap();
        assert_eq!(outcome, LoginOutcome::NeedsProfile);
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.store().temp_token().as_deref(), Some("tok"));
    }

    #[test]
    fn verified_otp_without_profile_needs_completion() {
        let ctx = session();
        let pending = PendingVerification {
            temp_token: None,
            phone: Some("0812".into()),
            email: None,
        };
        let outcome = settle_verified(&ctx, payload(None), &pending).unwrap();
        assert_eq!(outcome, LoginOutcome::NeedsProfile);
        assert_eq!(ctx.store().pending().phone.as_deref(), Some("0812"));

        let outcome = settle_verified(&ctx, payload(Some(user(false, true))), &pending).unwrap();
        assert_eq!(outcome, LoginOutcome::Authenticated);
        assert_eq!(ctx.store().temp_token(), None);
    }

    #[test]
    fn invalid_input_is_refused_before_any_request() {
        let vm = SessionViewModel::new(AuthService::new(ApiClient::new("http://unused")), session());
        let err = block_on(vm.login("not an id", "secret")).unwrap_err();
        assert_eq!(err.status_code(), Some(422));
        let err = block_on(vm.verify_otp("12ab")).unwrap_err();
        assert_eq!(err.user_message(), "Kode OTP tidak valid");
        let err = block_on(vm.resend_otp()).unwrap_err();
        assert_eq!(err.status_code(), Some(422));
    }

    #[test]
    fn logout_without_token_still_clears() {
        let ctx = session();
        ctx.store().set_temp_token("tmp").unwrap();
        let vm = SessionViewModel::new(AuthService::new(ApiClient::new("http://unused")), ctx.clone());
        block_on(vm.logout()).unwrap();
        assert_eq!(ctx.token(), None);
    }
}
