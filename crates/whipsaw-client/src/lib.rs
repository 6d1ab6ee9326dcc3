//! # Whipsaw Client
//!
//! Application core for the portfolio front end: the persisted admin
//! session, the page table with its route guard, and a typed client for the
//! Content API and auth gate.
//!
//! The session is an explicit value owned by the application root. Every
//! protected call takes it by `&mut` so an unauthorized answer can clear it.

pub mod api;
pub mod error;
pub mod routes;
pub mod session;

pub use api::ContentClient;
pub use error::ClientError;
pub use routes::{Access, Page, RouteDecision, guard};
pub use session::{MemoryStorage, SESSION_SLOT, Session, SessionStorage};
