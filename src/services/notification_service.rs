use crate::error::ApiError;
use crate::models::{NewsItem, Notification};
use crate::services::api_client::ApiClient;

#[derive(Clone)]
pub struct NotificationService {
    client: ApiClient,
}

impl NotificationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Notification>, ApiError> {
        self.client.get("/notifications").await
    }

    pub async fn mark_read(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .put_unit(&format!("/notifications/{}/read", id))
            .await
    }

    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.client.put_unit("/notifications/read-all").await
    }
}

/// Public news feed
#[derive(Clone)]
pub struct NewsService {
    client: ApiClient,
}

impl NewsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<NewsItem>, ApiError> {
        self.client.get("/news").await
    }

    pub async fn get(&self, id: &str) -> Result<NewsItem, ApiError> {
        self.client.get(&format!("/news/{}", id)).await
    }
}
