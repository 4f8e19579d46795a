//! Bearer credential decoding and token verification.

use crate::claims::Claims;
use crate::error::AuthError;
use crate::jwks::KeySetCache;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// The untrusted header of a decoded token. Nothing here is believed
/// until the signature check succeeds.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenHeader {
    /// Signing algorithm the token claims to use.
    pub alg: String,
    /// Identifier of the signing key, looked up in the key set.
    #[serde(default)]
    pub kid: Option<String>,
}

/// A structurally valid credential: parsed header, unverified claims
/// preview, and the compact token the signature covers.
#[derive(Debug, Clone)]
pub struct DecodedCredential {
    pub header: TokenHeader,
    pub claims: serde_json::Value,
    pub token: String,
}

/// Split and parse a raw `Authorization` header value.
///
/// Purely syntactic; each check fails with a distinct cause, in order:
/// header present, `Bearer <token>` shape, three dot-separated segments,
/// base64url+JSON header and payload.
pub fn decode_credential(raw: Option<&str>) -> Result<DecodedCredential, AuthError> {
    let raw = raw.ok_or(AuthError::AuthorizationHeaderMissing)?;

    let mut parts = raw.split_whitespace();
    let (scheme, token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => {
            return Err(AuthError::InvalidHeaderFormat(
                "Authorization header must start with 'Bearer'".to_string(),
            ));
        }
    };
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidHeaderFormat(
            "Authorization header must start with 'Bearer'".to_string(),
        ));
    }

    let segments: Vec<&str> = token.split('.').collect();
    let [header_b64, payload_b64, _signature] = segments.as_slice() else {
        return Err(AuthError::InvalidHeaderFormat("Token malformed".to_string()));
    };

    let header: TokenHeader = decode_segment(header_b64)?;
    let claims: serde_json::Value = decode_segment(payload_b64)?;

    Ok(DecodedCredential {
        header,
        claims,
        token: token.to_string(),
    })
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| AuthError::InvalidTokenStructure)?;
    serde_json::from_slice(&bytes).map_err(|_| AuthError::InvalidTokenStructure)
}

/// Configuration for signature and claims validation.
///
/// The algorithm is pinned to exactly one asymmetric algorithm; a token
/// naming anything else is rejected before key lookup so a weaker or
/// symmetric algorithm supplied by the token can never be used.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Expected `iss` claim, compared exactly.
    pub issuer: String,
    /// Expected `aud` claim (membership when the token carries a list).
    pub audience: String,
    /// The single accepted signing algorithm.
    pub algorithm: Algorithm,
    /// Clock leeway in seconds applied to `exp`. Zero unless configured.
    pub leeway: u64,
}

/// Verifies a decoded credential's signature and standard claims.
#[derive(Debug)]
pub struct TokenVerifier {
    config: VerifierConfig,
    keys: KeySetCache,
}

impl TokenVerifier {
    pub fn new(config: VerifierConfig, keys: KeySetCache) -> Self {
        Self { config, keys }
    }

    /// Verify the signature against the key named by the token's `kid` and
    /// validate issuer, audience, and expiry. Returns the claims unchanged.
    pub async fn verify(&self, decoded: &DecodedCredential) -> Result<Claims, AuthError> {
        match decoded.header.alg.parse::<Algorithm>() {
            Ok(alg) if alg == self.config.algorithm => {}
            _ => {
                return Err(AuthError::InvalidHeaderFormat(
                    "Unsupported signing algorithm".to_string(),
                ));
            }
        }

        let kid = decoded.header.kid.as_deref().ok_or_else(|| {
            AuthError::InvalidHeaderFormat("Unable to find the appropriate key".to_string())
        })?;

        let jwk = self.keys.get_key(kid).await?;
        let key = DecodingKey::from_jwk(&jwk).map_err(|_| {
            AuthError::InvalidHeaderFormat("Unable to find the appropriate key".to_string())
        })?;

        let token_data = jsonwebtoken::decode::<Claims>(&decoded.token, &key, &self.validation())
            .map_err(map_jwt_error)?;

        Ok(token_data.claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.config.algorithm);
        validation.leeway = self.config.leeway;
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::InvalidClaims("token is expired".to_string()),
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::ImmatureSignature => AuthError::InvalidClaims(
            "incorrect claims, please check the audience and issuer".to_string(),
        ),
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => {
            AuthError::InvalidHeaderFormat("Unsupported signing algorithm".to_string())
        }
        ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidKeyFormat => {
            AuthError::InvalidHeaderFormat("Unable to find the appropriate key".to_string())
        }
        _ => AuthError::InvalidTokenStructure,
    }
}
