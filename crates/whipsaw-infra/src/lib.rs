//! # Whipsaw Infrastructure
//!
//! Concrete implementations of the ports defined in `whipsaw-core`.
//! This crate contains the content stores, credential handling, and the
//! outbound mail relay.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store and console mail only
//! - `postgres` - PostgreSQL content store via SeaORM
//! - `auth` - JWT credentials + Argon2 administrator password
//! - `mail` - HTTPS transactional-email relay via reqwest

pub mod mail;
pub mod store;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "postgres")]
pub mod database;

// Re-exports - In-Memory
pub use mail::ConsoleMailRelay;
pub use store::InMemoryContentStore;

#[cfg(feature = "auth")]
pub use auth::{AdminAccount, Argon2PasswordService, FixedAdminVerifier, JwtTokenService};

#[cfg(feature = "mail")]
pub use mail::HttpMailRelay;

#[cfg(feature = "postgres")]
pub use database::{PostgresBlogStore, PostgresWorkStore};

/// Whether `RUST_ENV` marks this process as a production deployment.
pub fn is_production() -> bool {
    std::env::var("RUST_ENV")
        .map(|v| v == "production" || v == "prod")
        .unwrap_or(false)
}
