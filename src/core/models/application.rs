//! Application document

use serde::{Deserialize, Serialize};

/// A student's application to a job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub job_id: String,
    pub student_id: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_status() -> String {
    "PENDING".to_string()
}

impl Application {
    pub fn new(
        id: impl Into<String>,
        job_id: impl Into<String>,
        student_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            job_id: job_id.into(),
            student_id: student_id.into(),
            status: default_status(),
            created_at: Some(chrono::Utc::now()),
        }
    }
}
