use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:8080"
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Path to the local SQLite file holding the drinks table.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_database_path() -> String {
    "data/tapline.sqlite".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            database_path: default_database_path(),
        }
    }
}

/// Token verification settings. Issuer and audience have no defaults on
/// purpose: leaving either empty stops the process at startup instead of
/// admitting unverifiable tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub issuer: String,

    #[serde(default)]
    pub audience: String,

    /// The single accepted signing algorithm.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Clock leeway in seconds for expiry validation.
    #[serde(default)]
    pub leeway_seconds: u64,

    /// Staleness bound for the cached signing key set, in seconds.
    #[serde(default = "default_jwks_ttl")]
    pub jwks_ttl_seconds: u64,
}

fn default_algorithm() -> String {
    "RS256".to_string()
}

fn default_jwks_ttl() -> u64 {
    3600
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: String::new(),
            audience: String::new(),
            algorithm: default_algorithm(),
            leeway_seconds: 0,
            jwks_ttl_seconds: default_jwks_ttl(),
        }
    }
}

pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = config_path();
    let raw = fs::read_to_string(&path)?;
    let cfg: AppConfig = toml::from_str(&raw)?;
    Ok(cfg)
}

fn config_path() -> PathBuf {
    if let Ok(p) = env::var("TAPLINE_SERVER_CONFIG") {
        return PathBuf::from(p);
    }
    PathBuf::from("config.toml")
}
