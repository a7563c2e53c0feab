use crate::error::ApiError;
use crate::models::{ProfileUpdate, UserProfile};
use crate::services::api_client::ApiClient;
use crate::state::SessionContext;

/// Profile endpoints; keeps the cached snapshot in the session fresh
#[derive(Clone)]
pub struct ProfileService {
    client: ApiClient,
    session: SessionContext,
}

impl ProfileService {
    pub fn new(client: ApiClient, session: SessionContext) -> Self {
        Self { client, session }
    }

    pub async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let profile: UserProfile = self.client.get("/profile").await?;
        self.session.store().update_profile(&profile)?;
        Ok(profile)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        update
            .validate()
            .map_err(|message| ApiError::Application {
                status_code: 422,
                message,
            })?;
        let profile: UserProfile = self.client.put("/profile", update).await?;
        self.session.store().update_profile(&profile)?;
        log::info!("✅ [PROFILE] Profile updated for {}", profile.id);
        Ok(profile)
    }
}
