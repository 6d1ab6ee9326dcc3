//! Domain services - the operations the HTTP layer exposes.

mod auth_gate;
mod contact;
mod content;

pub use auth_gate::{AuthGate, Credential};
pub use contact::{ContactService, escape_html};
pub use content::ContentService;
