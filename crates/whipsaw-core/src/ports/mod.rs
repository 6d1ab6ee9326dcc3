//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod mail;
mod store;

pub use auth::{
    ADMIN_ROLE, AdminIdentity, AuthError, CredentialVerifier, PasswordService, TokenClaims,
    TokenService,
};
pub use mail::{MailError, MailRelay, Mailbox, OutboundEmail};
pub use store::ContentStore;
