use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramType {
    Training,
    Certification,
    Funding,
}

impl ProgramType {
    pub fn as_query(&self) -> &'static str {
        match self {
            ProgramType::Training => "training",
            ProgramType::Certification => "certification",
            ProgramType::Funding => "funding",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProgramType::Training => "Pelatihan",
            ProgramType::Certification => "Sertifikasi",
            ProgramType::Funding => "Pendanaan",
        }
    }
}

/// Government or partner program
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub program_type: ProgramType,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub quota: Option<u32>,
    #[serde(default)]
    pub required_documents: Vec<String>,
}

impl Program {
    /// No deadline means always open
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.deadline.map_or(true, |deadline| now < deadline)
    }
}
