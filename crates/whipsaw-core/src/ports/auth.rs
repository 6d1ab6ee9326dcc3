//! Authentication and authorization ports.

use async_trait::async_trait;

/// Role carried by every credential the gate issues.
pub const ADMIN_ROLE: &str = "admin";

/// Claims decoded from a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub subject: String,
    pub role: String,
    pub issued_at: i64,
}

/// The administrator a write is performed as.
///
/// HTTP requests obtain one only through [`AuthGate::authorize`]. Trusted
/// in-process callers such as startup seeding may build one directly.
///
/// [`AuthGate::authorize`]: crate::services::AuthGate::authorize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub username: String,
}

/// Token service trait for issuing and decoding bearer credentials.
pub trait TokenService: Send + Sync {
    /// Issue a credential for `subject`.
    fn issue_token(&self, subject: &str, role: &str) -> Result<String, AuthError>;

    /// Validate and decode a credential.
    fn decode_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Decides which username/password pairs belong to an administrator.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Check a login attempt. `None` means the pair is not an administrator.
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AdminIdentity>, AuthError>;

    /// Resolve the subject of a decoded credential back to an administrator.
    async fn identify(&self, subject: &str) -> Result<Option<AdminIdentity>, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
