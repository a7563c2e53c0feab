// ============================================================================
// API CLIENT - HTTP only (stateless apart from the injected session)
// ============================================================================
// No business logic: build the request, attach the bearer token, hand the
// body to the envelope parser.
// ============================================================================

use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::models::api::{parse_envelope, parse_required};
use crate::state::SessionContext;

/// Status, body and whether a bearer token went out with the request
struct RawResponse {
    status: u16,
    body: String,
    sent_bearer: bool,
}

impl RawResponse {
    fn required<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        parse_required(self.status, &self.body, self.sent_bearer)
    }

    fn optional<T: DeserializeOwned>(&self) -> Result<Option<T>, ApiError> {
        parse_envelope(self.status, &self.body, self.sent_bearer)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Put,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: Option<SessionContext>,
    bearer_override: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: None,
            bearer_override: None,
        }
    }

    /// Attach the session whose token is sent on every call
    pub fn with_session(mut self, session: SessionContext) -> Self {
        self.session = Some(session);
        self
    }

    /// Use a specific token instead of the session one (temporary token
    /// during registration)
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_override = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn bearer(&self) -> Option<String> {
        self.bearer_override.clone().or_else(|| {
            self.session
                .as_ref()
                .and_then(SessionContext::authorization_token)
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Verb::Get, path, None).await?.required()
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, ApiError> {
        self.execute(Verb::Post, path, Some(to_json(payload)?))
            .await?
            .required()
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, ApiError> {
        self.execute(Verb::Put, path, Some(to_json(payload)?))
            .await?
            .required()
    }

    /// POST where the backend may answer without `data`
    pub async fn post_optional<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<Option<T>, ApiError> {
        self.execute(Verb::Post, path, Some(to_json(payload)?))
            .await?
            .optional()
    }

    /// POST whose `data` is ignored
    pub async fn post_unit<B: Serialize>(&self, path: &str, payload: &B) -> Result<(), ApiError> {
        self.post_optional::<B, serde_json::Value>(path, payload)
            .await
            .map(|_| ())
    }

    /// PUT without a request body, `data` ignored
    pub async fn put_unit(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Verb::Put, path, None)
            .await?
            .optional::<serde_json::Value>()
            .map(|_| ())
    }

    async fn execute(
        &self,
        verb: Verb,
        path: &str,
        json: Option<String>,
    ) -> Result<RawResponse, ApiError> {
        let url = self.url(path);
        let mut builder: RequestBuilder = match verb {
            Verb::Get => Request::get(&url),
            Verb::Post => Request::post(&url),
            Verb::Put => Request::put(&url),
        }
        .header("Accept", "application/json");

        let bearer = self.bearer();
        if let Some(token) = &bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let request = match json {
            Some(body) => builder.header("Content-Type", "application/json").body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Request(e.to_string()))?;

        log::debug!("🌐 [API] {:?} {}", verb, path);

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if status == 401 && bearer.is_some() {
            log::warn!("🔒 [API] {} rejected the session token", path);
        } else if !(200..300).contains(&status) {
            log::warn!("⚠️ [API] {:?} {} -> HTTP {}", verb, path, status);
        }

        Ok(RawResponse {
            status,
            body,
            sent_bearer: bearer.is_some(),
        })
    }
}

fn to_json<B: Serialize>(payload: &B) -> Result<String, ApiError> {
    serde_json::to_string(payload).map_err(|e| ApiError::Request(e.to_string()))
}
