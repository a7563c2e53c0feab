// ============================================================================
// ERRORS - Typed failures surfaced to screens
// ============================================================================
// Every failure ends as an inline message on the originating screen.
// Nothing here is fatal to the app.
// ============================================================================

use thiserror::Error;

/// Failures reaching durable browser storage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,

    #[error("could not write key '{0}'")]
    Write(String),

    #[error("could not remove key '{0}'")]
    Remove(String),

    #[error("could not serialize value: {0}")]
    Serialize(String),
}

/// Failures talking to the REST backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request never produced an HTTP response (offline, DNS, CORS...)
    #[error("network error: {0}")]
    Network(String),

    /// Backend answered `status: false` or a non-2xx code
    #[error("{message}")]
    Application { status_code: u16, message: String },

    /// Backend rejected the bearer token
    #[error("{message}")]
    Unauthorized { message: String },

    /// Response body did not match the expected envelope
    #[error("invalid response: {0}")]
    Decode(String),

    /// Request could not be built (serialization, bad header)
    #[error("request error: {0}")]
    Request(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// HTTP-like status code carried by the error, when there is one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Application { status_code, .. } => Some(*status_code),
            ApiError::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Text shown inline under a form or list
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Tidak dapat terhubung ke server. Periksa koneksi internet Anda.".to_string()
            }
            ApiError::Unauthorized { .. } => {
                "Sesi Anda telah berakhir. Silakan masuk kembali.".to_string()
            }
            ApiError::Application { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => "Terjadi kesalahan. Silakan coba lagi.".to_string(),
        }
    }
}
