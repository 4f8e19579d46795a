//! Error types for the auth crate.

use thiserror::Error;

/// Errors produced while verifying a bearer credential.
///
/// Every variant's `Display` output is the user-visible description the
/// route layer returns; nothing internal (reqwest/jsonwebtoken errors)
/// leaks past this type.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization` header was supplied.
    #[error("Authorization header is expected")]
    AuthorizationHeaderMissing,

    /// The header or token has the wrong shape (bad scheme, wrong segment
    /// count, or no usable key for the token's kid).
    #[error("{0}")]
    InvalidHeaderFormat(String),

    /// A token segment could not be base64url-decoded or JSON-parsed.
    #[error("Unable to parse authentication token")]
    InvalidTokenStructure,

    /// Signature verification against the issuer's key failed.
    #[error("Signature verification failed")]
    InvalidSignature,

    /// Issuer, audience, expiry, or the permissions field is wrong.
    #[error("{0}")]
    InvalidClaims(String),

    /// Token verified, but the required permission is not granted.
    #[error("Permission not found")]
    Unauthorized,

    /// The issuer's key endpoint could not be reached or returned garbage.
    /// Distinct from "key not found": we could not check the token at all.
    /// The underlying transport error is logged at the fetch site, not
    /// exposed here.
    #[error("Unable to fetch signing keys")]
    KeyStoreUnavailable,
}

impl AuthError {
    /// Stable machine-readable kind, used in logs and denial payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::AuthorizationHeaderMissing => "authorization_header_missing",
            AuthError::InvalidHeaderFormat(_) => "invalid_header",
            AuthError::InvalidTokenStructure => "invalid_token_structure",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::InvalidClaims(_) => "invalid_claims",
            AuthError::Unauthorized => "unauthorized",
            AuthError::KeyStoreUnavailable => "key_store_unavailable",
        }
    }

    /// HTTP status the route layer should answer with.
    ///
    /// 403 is reserved for the authenticated-but-forbidden case; every
    /// authentication-stage failure (key store trouble included) is a 401.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Unauthorized => 403,
            _ => 401,
        }
    }
}

/// Rejected gate configuration (empty issuer or audience).
///
/// Raised at construction time so a misconfigured process refuses to
/// start instead of silently admitting everything.
#[derive(Debug, Error)]
#[error("invalid auth configuration: {0}")]
pub struct ConfigError(pub String);

/// A structured denial handed to the route layer.
///
/// One of the two outcomes of [`crate::gate::AuthorizationGate::authorize`];
/// the other is the verified [`crate::claims::Claims`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    /// Machine-readable failure kind.
    pub kind: &'static str,
    /// HTTP status, 401 or 403.
    pub status: u16,
    /// Human-readable description, safe to return to the caller.
    pub message: String,
}

impl From<AuthError> for Denial {
    fn from(err: AuthError) -> Self {
        Denial {
            kind: err.kind(),
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}
