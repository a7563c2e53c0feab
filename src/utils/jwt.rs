// ============================================================================
// JWT - Client-side claim decoding (display only, never verified)
// ============================================================================

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decode the payload segment of a JWT-shaped token.
///
/// Returns `None` for anything that is not `header.payload[.signature]` with a
/// base64url JSON object in the middle. The signature is not checked.
pub fn decode_token(token: &str) -> Option<Map<String, Value>> {
    let mut segments = token.trim().split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    if payload.is_empty() {
        return None;
    }

    // Some issuers keep the '=' padding
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| URL_SAFE.decode(payload))
        .ok()?;

    match serde_json::from_slice::<Value>(&bytes).ok()? {
        Value::Object(claims) => Some(claims),
        _ => None,
    }
}

/// Typed view over the registered claims the client cares about
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<Value>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl TokenClaims {
    pub fn from_token(token: &str) -> Option<Self> {
        let claims = decode_token(token)?;
        serde_json::from_value(Value::Object(claims)).ok()
    }

    /// A token without `exp` never expires client-side
    pub fn is_expired(&self, now_unix: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_unix)
    }

    /// `sub` rendered as text whether the issuer used a string or a number
    pub fn subject(&self) -> Option<String> {
        match self.sub.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn decodes_middle_segment() {
        let claims = decode_token("a.eyJmb28iOiJiYXIifQ.c").expect("claims");
        assert_eq!(claims.get("foo"), Some(&Value::String("bar".into())));
        assert_eq!(claims.len(), 1);
    }

    #[test]
    fn missing_middle_segment_is_none() {
        assert_eq!(decode_token("no-dots-here"), None);
        assert_eq!(decode_token("header."), None);
        assert_eq!(decode_token(""), None);
    }

    #[test]
    fn malformed_payloads_are_none() {
        assert_eq!(decode_token("a.%%%.c"), None);
        // valid base64 of a JSON array, not an object
        assert_eq!(decode_token(&token_with("[1,2]")), None);
        // valid base64 of plain text
        assert_eq!(decode_token(&token_with("hello")), None);
    }

    #[test]
    fn padded_payload_is_accepted() {
        let padded = format!("h.{}.s", URL_SAFE.encode(r#"{"a":1}"#));
        assert!(padded.contains('='));
        assert!(decode_token(&padded).is_some());
    }

    #[test]
    fn typed_claims_and_expiry() {
        let token = token_with(r#"{"sub":42,"exp":1000,"name":"Sari"}"#);
        let claims = TokenClaims::from_token(&token).unwrap();
        assert_eq!(claims.subject().as_deref(), Some("42"));
        assert_eq!(claims.name.as_deref(), Some("Sari"));
        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000));

        let no_exp = TokenClaims::from_token("a.eyJmb28iOiJiYXIifQ.c").unwrap();
        assert!(!no_exp.is_expired(i64::MAX));
    }
}
