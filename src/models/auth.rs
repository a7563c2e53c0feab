use serde::{Deserialize, Serialize};

use crate::models::user::UserProfile;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct VerifyOtpRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub otp: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ResendOtpRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// `data` of login, OTP verification and profile completion
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AuthPayload {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// `data` of registration: the account exists but is not verified yet
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct RegisterPayload {
    #[serde(default)]
    pub temp_token: Option<String>,
}

/// Contact details kept between registration and OTP verification
#[derive(Clone, PartialEq, Debug, Default)]
pub struct PendingVerification {
    pub temp_token: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl PendingVerification {
    pub fn is_empty(&self) -> bool {
        self.temp_token.is_none() && self.phone.is_none() && self.email.is_none()
    }
}

/// Login identifier typed into a single field
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Identifier {
    Email(String),
    Phone(String),
}

impl Identifier {
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }
        if value.contains('@') {
            return Some(Identifier::Email(value.to_lowercase()));
        }
        let digits: String = value
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();
        let body = digits.strip_prefix('+').unwrap_or(&digits);
        if body.len() >= 9 && body.chars().all(|c| c.is_ascii_digit()) {
            Some(Identifier::Phone(digits))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Identifier::Email(v) | Identifier::Phone(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_parsing() {
        assert_eq!(
            Identifier::parse(" Owner@Toko.ID "),
            Some(Identifier::Email("owner@toko.id".into()))
        );
        assert_eq!(
            Identifier::parse("0812-3456 7890"),
            Some(Identifier::Phone("081234567890".into()))
        );
        assert_eq!(
            Identifier::parse("+6281234567"),
            Some(Identifier::Phone("+6281234567".into()))
        );
        assert_eq!(Identifier::parse("budi"), None);
        assert_eq!(Identifier::parse("   "), None);
    }

    #[test]
    fn otp_request_omits_missing_contact() {
        let req = VerifyOtpRequest {
            phone: Some("0812".into()),
            email: None,
            otp: "123456".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("email").is_none());
        assert_eq!(json["phone"], "0812");
    }
}
