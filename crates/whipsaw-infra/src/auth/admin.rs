//! The single pre-provisioned administrator.

use std::sync::Arc;

use async_trait::async_trait;

use whipsaw_core::ports::{AdminIdentity, AuthError, CredentialVerifier, PasswordService};

use super::password::Argon2PasswordService;

const DEFAULT_USERNAME: &str = "admin";
const DEVELOPMENT_PASSWORD: &str = "admin123";

/// Administrator login: a username and an Argon2 PHC hash.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub username: String,
    pub password_hash: String,
}

impl AdminAccount {
    /// Load from `ADMIN_USERNAME` and `ADMIN_PASSWORD_HASH`, falling back to
    /// hashing `ADMIN_PASSWORD` (or the development password) at startup.
    pub fn from_env(passwords: &dyn PasswordService) -> Result<Self, AuthError> {
        let username =
            std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| DEFAULT_USERNAME.to_string());

        if let Ok(password_hash) = std::env::var("ADMIN_PASSWORD_HASH") {
            Argon2PasswordService::check_phc(&password_hash)?;
            return Ok(Self {
                username,
                password_hash,
            });
        }

        let password = match std::env::var("ADMIN_PASSWORD") {
            Ok(password) => password,
            Err(_) => {
                if crate::is_production() {
                    tracing::error!(
                        "SECURITY: Using the development admin password in production! Set ADMIN_PASSWORD_HASH."
                    );
                } else {
                    tracing::warn!(
                        "Using the development admin password. Set ADMIN_PASSWORD_HASH for production use."
                    );
                }
                DEVELOPMENT_PASSWORD.to_string()
            }
        };

        Ok(Self {
            username,
            password_hash: passwords.hash(&password)?,
        })
    }
}

/// Accepts exactly one username/password pair.
pub struct FixedAdminVerifier {
    account: AdminAccount,
    passwords: Arc<dyn PasswordService>,
}

impl FixedAdminVerifier {
    pub fn new(account: AdminAccount, passwords: Arc<dyn PasswordService>) -> Self {
        Self { account, passwords }
    }

    fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            username: self.account.username.clone(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for FixedAdminVerifier {
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AdminIdentity>, AuthError> {
        // hash check runs for unknown usernames too, so both failures cost the same
        let password_matches = self.passwords.verify(password, &self.account.password_hash)?;
        let username_matches = username == self.account.username;

        Ok((username_matches && password_matches).then(|| self.identity()))
    }

    async fn identify(&self, subject: &str) -> Result<Option<AdminIdentity>, AuthError> {
        Ok((subject == self.account.username).then(|| self.identity()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtConfig, JwtTokenService};
    use whipsaw_core::ports::TokenService;
    use whipsaw_core::services::AuthGate;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "gate-secret".to_string(),
            issuer: "gate-test".to_string(),
        }
    }

    fn gate() -> AuthGate {
        let passwords = Arc::new(Argon2PasswordService::new());
        let account = AdminAccount {
            username: "admin".to_string(),
            password_hash: passwords.hash("admin123").unwrap(),
        };
        AuthGate::new(
            Arc::new(FixedAdminVerifier::new(account, passwords)),
            Arc::new(JwtTokenService::new(jwt())),
        )
    }

    #[tokio::test]
    async fn test_login_issues_working_credential() {
        let gate = gate();

        let credential = gate.login("admin", "admin123").await.unwrap();
        assert_eq!(credential.identity.username, "admin");

        let identity = gate.authorize(&credential.token).await.unwrap();
        assert_eq!(identity.username, "admin");
    }

    #[tokio::test]
    async fn test_every_wrong_pair_gets_the_same_error() {
        let gate = gate();

        for (username, password) in [
            ("admin", "wrong"),
            ("admin", ""),
            ("root", "admin123"),
            ("Admin", "admin123"),
            ("", ""),
            ("root", "wrong"),
        ] {
            let result = gate.login(username, password).await;
            assert!(
                matches!(result, Err(AuthError::InvalidCredentials)),
                "{username}/{password} should be rejected generically"
            );
        }
    }

    #[tokio::test]
    async fn test_token_for_another_subject_is_rejected() {
        let gate = gate();
        let forged = JwtTokenService::new(jwt())
            .issue_token("mallory", "admin")
            .unwrap();

        assert!(matches!(
            gate.authorize(&forged).await,
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn test_token_without_admin_role_is_rejected() {
        let gate = gate();
        let token = JwtTokenService::new(jwt())
            .issue_token("admin", "viewer")
            .unwrap();

        assert!(gate.authorize(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_token_is_rejected() {
        assert!(gate().authorize("not.a.jwt").await.is_err());
    }
}
