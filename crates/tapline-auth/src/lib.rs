//! # tapline-auth
//!
//! Bearer token verification and permission enforcement for Tapline.
//!
//! This crate provides functionality for:
//! - Fetching and caching the issuer's public signing keys (JWKS)
//! - Decoding `Authorization: Bearer <token>` credentials
//! - Verifying token signatures and standard claims (issuer, audience, expiry)
//! - Checking a required permission against the token's grants
//!
//! ## Flow
//!
//! The route layer calls exactly one function,
//! [`AuthorizationGate::authorize`], with the raw header value and the
//! permission the route requires. The gate decodes the credential, verifies
//! it against the pinned algorithm and the issuer's current key set, checks
//! the permission, and returns either the verified [`Claims`] or a
//! [`Denial`] carrying the HTTP status (401 or 403) and a description.
//!
//! The accepted signing algorithm is pinned server-side; a token naming any
//! other algorithm is rejected before key lookup.

pub mod claims;
pub mod error;
pub mod gate;
pub mod jwks;
pub mod token;

pub use claims::{Audience, Claims};
pub use jsonwebtoken::Algorithm;
pub use error::{AuthError, ConfigError, Denial};
pub use gate::{AuthorizationGate, GateConfig};
pub use jwks::KeySetCache;
pub use token::{DecodedCredential, TokenHeader, TokenVerifier, VerifierConfig, decode_credential};
