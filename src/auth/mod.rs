//! Authentication and authorization
//!
//! Tokens are issued by an external identity provider; this module only
//! verifies them and turns their claims into an [`AuthContext`] the RBAC
//! guards can consume. The [`rbac`] submodule holds the decision layer.

mod claims;
pub mod rbac;

pub use claims::{AuthContext, Claims};

use crate::config::AuthConfig;
use crate::utils::error::{BoardError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

/// Verifies bearer tokens and decodes their claims
#[derive(Clone)]
pub struct AuthSystem {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
    token_ttl_secs: u64,
}

impl AuthSystem {
    /// Create an auth system from configuration
    pub fn new(config: &AuthConfig) -> Result<Self> {
        if config.jwt_secret.is_empty() {
            return Err(BoardError::config("auth.jwt_secret must not be empty"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        if let Some(audience) = &config.audience {
            validation.set_audience(&[audience]);
        } else {
            validation.validate_aud = false;
        }

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            token_ttl_secs: config.token_ttl_secs,
        })
    }

    /// Verify a bearer token and extract the caller's identity and role set
    pub fn verify_token(&self, token: &str) -> Result<AuthContext> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let context = AuthContext::from_claims(data.claims);
        debug!(user_id = %context.user_id, roles = ?context.roles, "Bearer token verified");
        Ok(context)
    }

    /// Issue a token for a subject with the given groups.
    ///
    /// Production tokens come from the external identity provider; this is
    /// for tests and local development.
    pub fn issue_token(&self, subject: &str, groups: &[&str]) -> Result<String> {
        let claims = Claims {
            sub: subject.to_string(),
            groups: Some(rbac::MultiValued::from(groups)),
            exp: (chrono::Utc::now().timestamp() as u64) + self.token_ttl_secs,
            iss: None,
            aud: None,
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }
}
