//! Job document

use super::Lab;
use serde::{Deserialize, Serialize};

/// A research position posted by a lab
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Direct owner, optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor_id: Option<String>,
    /// Subject id of the creator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Free-form; only a case-insensitive "OPEN" has behavioral meaning
    #[serde(default)]
    pub status: String,
    /// Denormalized lab snapshot, present when the caller already fetched
    /// the lab and wants to avoid a second lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab: Option<Lab>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Job {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lab_id: None,
            title: None,
            description: None,
            professor_id: None,
            created_by: None,
            status: String::new(),
            lab: None,
            created_at: None,
        }
    }

    /// Whether students may apply (status is case-insensitively "OPEN")
    pub fn is_open(&self) -> bool {
        self.status.eq_ignore_ascii_case("OPEN")
    }
}
