use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    InReview,
    Approved,
    Rejected,
    Completed,
    #[serde(other)]
    Unknown,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "Diajukan",
            ApplicationStatus::InReview => "Dalam Review",
            ApplicationStatus::Approved => "Disetujui",
            ApplicationStatus::Rejected => "Ditolak",
            ApplicationStatus::Completed => "Selesai",
            ApplicationStatus::Unknown => "Tidak diketahui",
        }
    }

    /// No further status change is expected
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Rejected | ApplicationStatus::Completed
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub program_id: String,
    #[serde(default)]
    pub program_title: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Already-encoded upload; producing `content` happens outside this crate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentAttachment {
    pub name: String,
    pub mime_type: String,
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRequest {
    #[serde(default)]
    pub motivation: Option<String>,
    #[serde(default)]
    pub documents: Vec<DocumentAttachment>,
}

impl ApplicationRequest {
    /// Names from `required` that have no attachment yet
    pub fn missing_documents<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        required
            .iter()
            .filter(|name| !self.documents.iter().any(|doc| &doc.name == *name))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_does_not_break_parsing() {
        let app: Application = serde_json::from_str(
            r#"{"id":"a1","program_id":"p1","status":"waiting_payment"}"#,
        )
        .unwrap();
        assert_eq!(app.status, ApplicationStatus::Unknown);
        assert!(!app.status.is_final());
    }

    #[test]
    fn missing_documents_lists_unattached_requirements() {
        let request = ApplicationRequest {
            motivation: None,
            documents: vec![DocumentAttachment {
                name: "KTP".into(),
                mime_type: "image/jpeg".into(),
                content: "...".into(),
            }],
        };
        let required = vec!["KTP".to_string(), "NIB".to_string()];
        assert_eq!(request.missing_documents(&required), vec!["NIB"]);
    }
}
