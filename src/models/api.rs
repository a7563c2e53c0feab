// ============================================================================
// API ENVELOPE - `{ status, statusCode, message, data? }`
// ============================================================================
// Every backend response is parsed here into a typed result-or-error before
// it reaches state or views.
// ============================================================================

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub status: bool,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default = "none")]
    pub data: Option<T>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> ApiEnvelope<T> {
    /// Fold the envelope and the transport status into one result.
    ///
    /// A 401 only means an expired session when the request carried a
    /// bearer token; otherwise (login, OTP) it is the server's refusal.
    pub fn into_result(self, http_status: u16, sent_bearer: bool) -> Result<Option<T>, ApiError> {
        if sent_bearer && (http_status == 401 || self.status_code == Some(401)) {
            return Err(ApiError::Unauthorized {
                message: self.message,
            });
        }

        if !self.status || !is_success(http_status) {
            let status_code = match self.status_code {
                Some(code) if !is_success(code) => code,
                _ if !is_success(http_status) => http_status,
                // status:false on a 2xx transport, keep the app-level code
                _ => self.status_code.unwrap_or(http_status),
            };
            return Err(ApiError::Application {
                status_code,
                message: self.message,
            });
        }

        Ok(self.data)
    }
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Parse a raw response body into the envelope payload.
///
/// `Ok(None)` means the backend succeeded without a `data` field.
pub fn parse_envelope<T: DeserializeOwned>(
    http_status: u16,
    body: &str,
    sent_bearer: bool,
) -> Result<Option<T>, ApiError> {
    match serde_json::from_str::<ApiEnvelope<T>>(body) {
        Ok(envelope) => envelope.into_result(http_status, sent_bearer),
        Err(e) => {
            if sent_bearer && http_status == 401 {
                return Err(ApiError::Unauthorized {
                    message: fallback_message(body, http_status),
                });
            }
            if !is_success(http_status) {
                // Proxies and gateways answer with HTML or plain text
                return Err(ApiError::Application {
                    status_code: http_status,
                    message: fallback_message(body, http_status),
                });
            }
            Err(ApiError::Decode(e.to_string()))
        }
    }
}

/// Like [`parse_envelope`] but the payload must be present
pub fn parse_required<T: DeserializeOwned>(
    http_status: u16,
    body: &str,
    sent_bearer: bool,
) -> Result<T, ApiError> {
    parse_envelope(http_status, body, sent_bearer)?
        .ok_or_else(|| ApiError::Decode("response has no data".to_string()))
}

fn fallback_message(body: &str, http_status: u16) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        format!("HTTP {}", http_status)
    } else {
        trimmed.chars().take(200).collect()
    }
}
