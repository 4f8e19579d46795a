//! The authorization gate: the single entry point for the route layer.

use crate::claims::Claims;
use crate::error::{AuthError, ConfigError, Denial};
use crate::jwks::{DEFAULT_TTL, KeySetCache};
use crate::token::{TokenVerifier, VerifierConfig, decode_credential};
use jsonwebtoken::Algorithm;
use std::time::Duration;

/// Configuration for the gate, supplied by the host process.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Issuer base URL; also the source of the JWKS document at
    /// `<issuer>/.well-known/jwks.json`.
    pub issuer: String,
    /// Expected audience.
    pub audience: String,
    /// The single accepted signing algorithm.
    pub algorithm: Algorithm,
    /// Clock leeway in seconds for expiry validation.
    pub leeway: u64,
    /// Staleness bound for the cached key set.
    pub jwks_ttl: Duration,
}

impl GateConfig {
    /// Config with the pinned RS256 algorithm, zero leeway, and the
    /// default key-set staleness bound.
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            algorithm: Algorithm::RS256,
            leeway: 0,
            jwks_ttl: DEFAULT_TTL,
        }
    }

    fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.issuer.trim_end_matches('/'))
    }
}

/// Verifies bearer credentials and answers the authorization question.
///
/// Safe to call concurrently; the only shared mutable state is the key
/// set cache, which swaps complete sets atomically. Routes share one gate
/// behind an `Arc`.
#[derive(Debug)]
pub struct AuthorizationGate {
    verifier: TokenVerifier,
}

impl AuthorizationGate {
    /// Build a gate from validated configuration.
    ///
    /// Fails closed: an empty issuer or audience is a construction error,
    /// never a permissive default.
    pub fn new(config: GateConfig) -> Result<Self, ConfigError> {
        if config.issuer.trim().is_empty() {
            return Err(ConfigError("issuer must be set".to_string()));
        }
        if config.audience.trim().is_empty() {
            return Err(ConfigError("audience must be set".to_string()));
        }

        let keys = KeySetCache::new(config.jwks_url(), config.jwks_ttl);
        let verifier = TokenVerifier::new(
            VerifierConfig {
                issuer: config.issuer,
                audience: config.audience,
                algorithm: config.algorithm,
                leeway: config.leeway,
            },
            keys,
        );

        Ok(Self { verifier })
    }

    /// Decode, verify, and check the credential for `permission`.
    ///
    /// Short-circuits on the first failure; no later stage ever sees
    /// unverified data from an earlier one. Every failure comes back as a
    /// structured [`Denial`], never a raw internal error.
    pub async fn authorize(
        &self,
        raw_header: Option<&str>,
        permission: &str,
    ) -> Result<Claims, Denial> {
        match self.check(raw_header, permission).await {
            Ok(claims) => Ok(claims),
            Err(err) => {
                tracing::debug!(kind = err.kind(), %permission, "authorization denied: {err}");
                Err(err.into())
            }
        }
    }

    async fn check(
        &self,
        raw_header: Option<&str>,
        permission: &str,
    ) -> Result<Claims, AuthError> {
        let decoded = decode_credential(raw_header)?;
        let claims = self.verifier.verify(&decoded).await?;
        claims.require_permission(permission)?;
        Ok(claims)
    }
}
