//! Bearer token claims

use super::rbac::{MultiValued, normalize};
use serde::{Deserialize, Serialize};

/// Decoded payload of the caller's bearer token.
///
/// The identity provider encodes group membership either as a single string
/// or as an array, so `groups` goes through the normalization boundary
/// before it is treated as a role set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Opaque subject identifier
    pub sub: String,
    /// Group membership; string or array depending on the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<MultiValued>,
    /// Expiry, seconds since the epoch
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// The caller's identity as handlers and guards see it
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Subject id from the token
    pub user_id: String,
    /// Normalized role set
    pub roles: Vec<String>,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            roles: normalize(claims.groups.as_ref()),
            user_id: claims.sub,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_as_array() {
        let claims = Claims {
            sub: "U1".to_string(),
            groups: Some(MultiValued::from(vec![
                "Admin".to_string(),
                "Professor".to_string(),
            ])),
            exp: 0,
            iss: None,
            aud: None,
        };
        let ctx = AuthContext::from_claims(claims);
        assert_eq!(ctx.roles, vec!["Admin", "Professor"]);
    }

    #[test]
    fn test_groups_as_comma_string() {
        let claims = Claims {
            sub: "U1".to_string(),
            groups: Some(MultiValued::from("Student,LabAssistant")),
            exp: 0,
            iss: None,
            aud: None,
        };
        let ctx = AuthContext::from_claims(claims);
        assert_eq!(ctx.roles, vec!["Student", "LabAssistant"]);
    }

    #[test]
    fn test_missing_groups_is_empty_role_set() {
        let claims = Claims {
            sub: "U1".to_string(),
            groups: None,
            exp: 0,
            iss: None,
            aud: None,
        };
        let ctx = AuthContext::from_claims(claims);
        assert!(ctx.roles.is_empty());
    }
}
