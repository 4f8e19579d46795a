//! # tapline-server
//!
//! HTTP API and persistence for the Tapline menu backend.
//!
//! This crate provides:
//! - CRUD routes over the `drinks` resource (axum)
//! - SQLite persistence for drink records (sqlx)
//! - Permission-gated route groups backed by `tapline-auth`
//! - TOML configuration and process bootstrap

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::ApiError;
pub use state::AppState;
