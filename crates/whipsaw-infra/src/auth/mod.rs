//! Authentication implementations.

mod admin;
mod jwt;
mod password;

pub use admin::{AdminAccount, FixedAdminVerifier};
pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
