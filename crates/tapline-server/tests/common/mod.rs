//! Shared test harness: an in-process mock issuer whose tokens the
//! router accepts. Only the helpers the API tests need; the decoder and
//! signature edge cases live in the auth crate's own tests.

use axum::{Json, Router, routing::get};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use rsa::RsaPrivateKey;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::traits::PublicKeyParts;
use serde_json::{Value, json};
use std::time::{SystemTime, UNIX_EPOCH};

pub const AUDIENCE: &str = "tapline";
const KID: &str = "test-key-1";

/// A mock issuer: local JWKS endpoint plus the matching signing key.
pub struct TestIssuer {
    /// Issuer base URL (`http://127.0.0.1:<port>/`).
    pub issuer: String,
    signing_key: RsaPrivateKey,
}

impl TestIssuer {
    /// Generate a keypair and serve its public half as a JWKS document on
    /// an ephemeral port.
    pub async fn start() -> Self {
        let signing_key =
            RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("generate RSA key");
        let jwks = jwks_document(&signing_key, KID);

        let app = Router::new().route(
            "/.well-known/jwks.json",
            get(move || {
                let body = jwks.clone();
                async move { Json(body) }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock issuer");
        let addr = listener.local_addr().expect("mock issuer addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock issuer");
        });

        Self {
            issuer: format!("http://{addr}/"),
            signing_key,
        }
    }

    /// Mint a token signed with the issuer's published key.
    pub fn token(&self, claims: &Value) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(KID.to_string());

        let der = self.signing_key.to_pkcs1_der().expect("encode RSA key");
        let encoding_key = EncodingKey::from_rsa_der(der.as_bytes());
        jsonwebtoken::encode(&header, claims, &encoding_key).expect("encode test token")
    }

    /// Standard claims for this issuer: audience, one hour of validity,
    /// and the given permissions (`None` omits the claim entirely).
    pub fn claims(&self, permissions: Option<&[&str]>) -> Value {
        self.claims_expiring_at(now() + 3600, permissions)
    }

    pub fn claims_expiring_at(&self, exp: i64, permissions: Option<&[&str]>) -> Value {
        let mut claims = json!({
            "iss": self.issuer,
            "sub": "auth0|test-user",
            "aud": AUDIENCE,
            "iat": now(),
            "exp": exp,
        });
        if let Some(perms) = permissions {
            claims["permissions"] = json!(perms);
        }
        claims
    }
}

pub fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs() as i64
}

fn jwks_document(key: &RsaPrivateKey, kid: &str) -> Value {
    let public = key.to_public_key();
    json!({
        "keys": [{
            "kty": "RSA",
            "use": "sig",
            "alg": "RS256",
            "kid": kid,
            "n": URL_SAFE_NO_PAD.encode(public.n().to_bytes_be()),
            "e": URL_SAFE_NO_PAD.encode(public.e().to_bytes_be()),
        }]
    })
}
