//! User document

use crate::auth::rbac::MultiValued;
use serde::{Deserialize, Serialize};

/// A user account, keyed by the identity provider's subject id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque subject identifier from the identity provider
    pub id: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role names; array or comma-joined string in stored data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<MultiValued>,
    /// Labs this user belongs to; same dual representation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_ids: Option<MultiValued>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            roles: None,
            lab_ids: None,
        }
    }
}
