//! Verified token claims and the permission check.

use crate::error::AuthError;
use serde::{Deserialize, Serialize};

/// The `aud` claim: issuers emit either a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    /// Whether the claim contains (or equals) the given audience.
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(a) => a == audience,
            Audience::Multiple(list) => list.iter().any(|a| a == audience),
        }
    }
}

/// Claims extracted from a verified token.
///
/// Only produced by [`crate::token::TokenVerifier`] after signature and
/// standard-claim validation; returned unchanged to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer URL, already checked against configuration.
    pub iss: String,
    /// Subject (the authenticated principal).
    pub sub: String,
    /// Audience, already checked against configuration.
    pub aud: Audience,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issued-at, when the issuer includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Granted permission strings. Absent entirely (`None`) is an invalid
    /// token; present-but-empty is a normal token with no grants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Membership check against the permission list. Duplicates in the
    /// list are irrelevant; a missing list never matches.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_deref()
            .is_some_and(|perms| perms.iter().any(|p| p == permission))
    }

    /// Enforce that this token grants `permission`.
    ///
    /// A token without a `permissions` claim at all is malformed for this
    /// system (the issuer is expected to always include one), which is a
    /// different failure from a well-formed token lacking the grant.
    pub fn require_permission(&self, permission: &str) -> Result<(), AuthError> {
        let Some(perms) = self.permissions.as_deref() else {
            return Err(AuthError::InvalidClaims(
                "Permissions not included in JWT".to_string(),
            ));
        };

        if perms.iter().any(|p| p == permission) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}
