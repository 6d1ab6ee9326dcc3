//! PostgreSQL persistence for the content collections.

mod connections;
pub mod entity;
mod postgres_store;

pub use connections::{DatabaseConfig, connect};
pub use postgres_store::{PostgresBlogStore, PostgresWorkStore};
