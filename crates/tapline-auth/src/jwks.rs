//! Cache for the issuer's published signing keys (JWKS).

use crate::error::AuthError;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default request timeout for the JWKS fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default staleness bound: a set older than this is refetched on next use.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct CachedKeys {
    set: Arc<JwkSet>,
    fetched_at: Instant,
}

impl CachedKeys {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Holds the issuer's current public signing keys, keyed by `kid`.
///
/// The set is fetched lazily on first need and replaced wholesale on
/// refresh: readers observe either the previous complete set or the new
/// one, never a partial mix. The write lock is only taken to swap the
/// `Arc`, never across the network fetch.
#[derive(Debug)]
pub struct KeySetCache {
    jwks_url: String,
    ttl: Duration,
    http: reqwest::Client,
    cache: RwLock<Option<CachedKeys>>,
}

impl KeySetCache {
    /// Create a cache for the given JWKS document URL.
    pub fn new(jwks_url: impl Into<String>, ttl: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "failed to configure HTTP client, using defaults");
                reqwest::Client::new()
            });

        Self {
            jwks_url: jwks_url.into(),
            ttl,
            http,
            cache: RwLock::new(None),
        }
    }

    /// Look up the key for `kid`.
    ///
    /// A miss (cold cache, stale set, or unknown kid) triggers exactly one
    /// fetch; a kid still unknown afterwards is reported as a key-not-found
    /// condition, while a failed fetch is the distinct
    /// [`AuthError::KeyStoreUnavailable`].
    pub async fn get_key(&self, kid: &str) -> Result<Jwk, AuthError> {
        if let Some(jwk) = self.cached_key(kid).await {
            return Ok(jwk);
        }

        self.refresh().await?;

        self.cached_key(kid).await.ok_or_else(|| {
            AuthError::InvalidHeaderFormat("Unable to find the appropriate key".to_string())
        })
    }

    /// Fetch the key set and swap it in atomically.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let set = match self.fetch().await {
            Ok(set) => set,
            Err(err) => {
                tracing::warn!(url = %self.jwks_url, error = %err, "signing key fetch failed");
                return Err(AuthError::KeyStoreUnavailable);
            }
        };

        tracing::debug!(url = %self.jwks_url, keys = set.keys.len(), "fetched signing key set");

        *self.cache.write().await = Some(CachedKeys {
            set: Arc::new(set),
            fetched_at: Instant::now(),
        });

        Ok(())
    }

    async fn cached_key(&self, kid: &str) -> Option<Jwk> {
        let cache = self.cache.read().await;
        let set = match cache.as_ref() {
            Some(cached) if cached.is_fresh(self.ttl) => Arc::clone(&cached.set),
            _ => return None,
        };
        drop(cache);

        set.keys
            .iter()
            .find(|k| k.common.key_id.as_deref() == Some(kid))
            .cloned()
    }

    async fn fetch(&self) -> Result<JwkSet, reqwest::Error> {
        self.http
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await
    }
}
