//! Lab document

use crate::auth::rbac::MultiValued;
use serde::{Deserialize, Serialize};

/// A research lab
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lab {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Single primary owner; legacy field kept for backward compatibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor_id: Option<String>,
    /// Canonical owner set; may or may not include `professor_id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor_ids: Option<MultiValued>,
    /// Lab assistants associated with this lab
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_assistant_ids: Option<MultiValued>,
}

impl Lab {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            professor_id: None,
            professor_ids: None,
            lab_assistant_ids: None,
        }
    }
}
