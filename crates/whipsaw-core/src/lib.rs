//! # Whipsaw Core
//!
//! The domain layer of the Whipsaw studio backend.
//! Blog posts and work items, the ports their storage and delivery go through,
//! and the services that enforce validation and the admin-only write path.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
