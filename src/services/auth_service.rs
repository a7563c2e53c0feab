use crate::error::ApiError;
use crate::models::{
    AuthPayload, LoginRequest, ProfileUpdate, RegisterPayload, RegisterRequest, ResendOtpRequest,
    VerifyOtpRequest,
};
use crate::services::api_client::ApiClient;

/// Authentication endpoints. Session persistence is the caller's job.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ApiError> {
        log::info!("🔐 [AUTH] Login for {}", request.identifier);
        self.client.post("/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterPayload, ApiError> {
        log::info!("📝 [AUTH] Registering {}", request.email);
        // Some deployments answer registration without `data`
        Ok(self
            .client
            .post_optional("/auth/register", request)
            .await?
            .unwrap_or_default())
    }

    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<AuthPayload, ApiError> {
        self.client.post("/auth/verify-otp", request).await
    }

    pub async fn resend_otp(&self, request: &ResendOtpRequest) -> Result<(), ApiError> {
        self.client.post_unit("/auth/resend-otp", request).await
    }

    /// KYC completion, sent with the temporary token
    pub async fn complete_profile(
        &self,
        temp_token: &str,
        update: &ProfileUpdate,
    ) -> Result<AuthPayload, ApiError> {
        self.client
            .clone()
            .with_bearer(temp_token)
            .put("/profile", update)
            .await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.post_unit("/auth/logout", &serde_json::json!({})).await
    }
}
