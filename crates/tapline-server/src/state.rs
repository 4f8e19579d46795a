use crate::config::AppConfig;
use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::time::Duration;
use std::{fs, path::Path, str::FromStr};
use tapline_auth::{Algorithm, AuthorizationGate, GateConfig};

/// Shared application state: configuration, the drinks database, and the
/// authorization gate every protected route consults.
pub struct AppState {
    pub cfg: AppConfig,
    pub db: SqlitePool,
    pub gate: AuthorizationGate,
}

impl AppState {
    pub async fn init(cfg: &AppConfig) -> anyhow::Result<Self> {
        ensure_parent_dir(&cfg.server.database_path)?;

        let options = SqliteConnectOptions::new()
            .filename(&cfg.server.database_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .context("opening drinks database")?;

        Self::with_pool(cfg.clone(), pool).await
    }

    /// Build state over an existing pool (tests use an in-memory SQLite).
    pub async fn with_pool(cfg: AppConfig, pool: SqlitePool) -> anyhow::Result<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;

        let algorithm = Algorithm::from_str(&cfg.auth.algorithm)
            .map_err(|_| anyhow::anyhow!("unknown signing algorithm {:?}", cfg.auth.algorithm))?;

        let gate = AuthorizationGate::new(GateConfig {
            issuer: cfg.auth.issuer.clone(),
            audience: cfg.auth.audience.clone(),
            algorithm,
            leeway: cfg.auth.leeway_seconds,
            jwks_ttl: Duration::from_secs(cfg.auth.jwks_ttl_seconds),
        })
        .context("constructing authorization gate")?;

        Ok(Self {
            cfg,
            db: pool,
            gate,
        })
    }
}

fn ensure_parent_dir(file_path: &str) -> anyhow::Result<()> {
    let p = Path::new(file_path);
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
