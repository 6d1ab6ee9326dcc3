//! The auth gate: login issues a credential, authorize checks one.
//!
//! Credentials are self-contained. The gate keeps no session table, so
//! logging out is the client forgetting its credential.

use std::sync::Arc;

use crate::ports::{ADMIN_ROLE, AdminIdentity, AuthError, CredentialVerifier, TokenService};

/// Credential issued on successful login.
#[derive(Debug, Clone)]
pub struct Credential {
    pub token: String,
    pub identity: AdminIdentity,
}

pub struct AuthGate {
    verifier: Arc<dyn CredentialVerifier>,
    tokens: Arc<dyn TokenService>,
}

impl AuthGate {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, tokens: Arc<dyn TokenService>) -> Self {
        Self { verifier, tokens }
    }

    /// anonymous -> authenticated.
    ///
    /// Any failure to match the administrator is the same
    /// [`AuthError::InvalidCredentials`], whichever half was wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        let identity = match self.verifier.verify(username, password).await? {
            Some(identity) => identity,
            None => {
                tracing::warn!("Rejected login attempt");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let token = self.tokens.issue_token(&identity.username, ADMIN_ROLE)?;
        tracing::info!(admin = %identity.username, "Administrator logged in");

        Ok(Credential { token, identity })
    }

    /// Check a presented credential. Never falls back to anonymous access.
    pub async fn authorize(&self, token: &str) -> Result<AdminIdentity, AuthError> {
        let claims = self.tokens.decode_token(token)?;
        if claims.role != ADMIN_ROLE {
            return Err(AuthError::InvalidToken(
                "credential does not carry the admin role".to_string(),
            ));
        }

        self.verifier
            .identify(&claims.subject)
            .await?
            .ok_or_else(|| {
                AuthError::InvalidToken("credential does not identify an administrator".to_string())
            })
    }

    /// Pull the token out of an `Authorization: Bearer <token>` header value.
    ///
    /// The scheme name is matched case-insensitively (RFC 7235).
    pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
        let value = header.ok_or(AuthError::MissingAuth)?;
        let token = match value.split_once(' ') {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("Bearer") => rest.trim(),
            _ => return Err(AuthError::InvalidToken("Expected Bearer token".to_string())),
        };

        if token.is_empty() {
            return Err(AuthError::InvalidToken("Empty bearer token".to_string()));
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert!(matches!(
            AuthGate::bearer_token(None),
            Err(AuthError::MissingAuth)
        ));
        assert!(matches!(
            AuthGate::bearer_token(Some("Basic abc")),
            Err(AuthError::InvalidToken(_))
        ));
        assert!(matches!(
            AuthGate::bearer_token(Some("Bearer   ")),
            Err(AuthError::InvalidToken(_))
        ));
        assert_eq!(AuthGate::bearer_token(Some("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn test_bearer_scheme_ignores_case() {
        assert_eq!(AuthGate::bearer_token(Some("bearer abc.def")).unwrap(), "abc.def");
        assert_eq!(AuthGate::bearer_token(Some("BEARER abc.def")).unwrap(), "abc.def");
        assert!(matches!(
            AuthGate::bearer_token(Some("Bearerabc.def")),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
