use serde::{Deserialize, Serialize};

/// Cached snapshot of the signed-in business owner
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub profile_completed: bool,
}

impl UserProfile {
    /// Name shown in the header; falls back to contact details
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
        self.email
            .clone()
            .or_else(|| self.phone.clone())
            .unwrap_or_else(|| "Pelaku UMKM".to_string())
    }
}

/// KYC-style profile completion payload (`PUT /profile`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub nik: String,
    pub business_name: String,
    #[serde(default)]
    pub business_sector: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl ProfileUpdate {
    /// NIK (national ID) is 16 digits
    pub fn validate(&self) -> Result<(), String> {
        if self.full_name.trim().is_empty() {
            return Err("Nama lengkap wajib diisi".to_string());
        }
        if self.nik.len() != 16 || !self.nik.chars().all(|c| c.is_ascii_digit()) {
            return Err("NIK harus 16 digit angka".to_string());
        }
        if self.business_name.trim().is_empty() {
            return Err("Nama usaha wajib diisi".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_name_then_contact() {
        let mut user = UserProfile {
            id: "1".into(),
            name: "  Budi ".into(),
            phone: Some("0812".into()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "Budi");
        user.name.clear();
        assert_eq!(user.display_name(), "0812");
        user.phone = None;
        assert_eq!(user.display_name(), "Pelaku UMKM");
    }

    #[test]
    fn tolerates_sparse_backend_user() {
        let user: UserProfile = serde_json::from_str(r#"{"id":"u-1"}"#).unwrap();
        assert!(!user.profile_completed);
        assert_eq!(user.email, None);
    }

    #[test]
    fn profile_update_checks_nik() {
        let mut update = ProfileUpdate {
            full_name: "Siti".into(),
            nik: "3201010101010001".into(),
            business_name: "Keripik Siti".into(),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
        update.nik = "12345".into();
        assert!(update.validate().is_err());
    }
}
