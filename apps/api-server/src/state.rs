//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;
use whipsaw_core::domain::{BlogPost, WorkItem};
use whipsaw_core::ports::{ContentStore, MailRelay, PasswordService};
use whipsaw_core::services::{AuthGate, ContactService, ContentService};
use whipsaw_infra::{
    AdminAccount, Argon2PasswordService, ConsoleMailRelay, FixedAdminVerifier,
    InMemoryContentStore, JwtTokenService,
};

use crate::config::{AppConfig, MailConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: ContentService<BlogPost>,
    pub work: ContentService<WorkItem>,
    pub auth: Arc<AuthGate>,
    pub contact: Arc<ContactService>,
    /// Which content store backs this process, reported by the health check.
    pub storage: &'static str,
}

/// The two content collections and the backend holding them.
pub struct ContentStores {
    pub blogs: Arc<dyn ContentStore<BlogPost>>,
    pub work: Arc<dyn ContentStore<WorkItem>>,
    pub label: &'static str,
}

impl ContentStores {
    pub fn in_memory() -> Self {
        Self {
            blogs: Arc::new(InMemoryContentStore::<BlogPost>::new()),
            work: Arc::new(InMemoryContentStore::<WorkItem>::new()),
            label: "memory",
        }
    }
}

impl AppState {
    pub fn new(
        stores: ContentStores,
        auth: Arc<AuthGate>,
        relay: Arc<dyn MailRelay>,
        mail: &MailConfig,
    ) -> Self {
        let contact = ContactService::new(relay, mail.sender.clone(), mail.recipient.clone());

        Self {
            blogs: ContentService::new(stores.blogs),
            work: ContentService::new(stores.work),
            auth,
            contact: Arc::new(contact),
            storage: stores.label,
        }
    }

    /// Build the state from configuration.
    ///
    /// Fails when a configured database cannot be reached or migrated; the
    /// server never starts on a fallback store in that case.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let stores = open_stores(config).await?;
        let auth = build_auth_gate()?;
        let relay = build_mail_relay(&config.mail)?;

        tracing::info!(storage = stores.label, "Application state initialized");
        Ok(Self::new(stores, Arc::new(auth), relay, &config.mail))
    }
}

#[cfg(feature = "postgres")]
async fn open_stores(config: &AppConfig) -> anyhow::Result<ContentStores> {
    use migration::{Migrator, MigratorTrait};
    use whipsaw_infra::database::connect;
    use whipsaw_infra::{PostgresBlogStore, PostgresWorkStore};

    let Some(db_config) = &config.database else {
        tracing::warn!("DATABASE_URL not set. Content is kept in memory and lost on restart.");
        return Ok(ContentStores::in_memory());
    };

    let conn = connect(db_config)
        .await
        .context("Failed to connect to the content database")?;

    if config.run_migrations {
        Migrator::up(&conn, None)
            .await
            .context("Failed to apply database migrations")?;
        tracing::info!("Database migrations applied");
    }

    Ok(ContentStores {
        blogs: Arc::new(PostgresBlogStore::new(conn.clone())),
        work: Arc::new(PostgresWorkStore::new(conn)),
        label: "postgres",
    })
}

#[cfg(not(feature = "postgres"))]
async fn open_stores(config: &AppConfig) -> anyhow::Result<ContentStores> {
    if config.database_url.is_some() {
        anyhow::bail!("DATABASE_URL is set but this build was compiled without the postgres feature");
    }
    tracing::warn!("Running without postgres feature. Content is kept in memory.");
    Ok(ContentStores::in_memory())
}

fn build_auth_gate() -> anyhow::Result<AuthGate> {
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let account = AdminAccount::from_env(passwords.as_ref())
        .context("Invalid administrator credentials configuration")?;
    tracing::info!(admin = %account.username, "Administrator account loaded");

    let verifier = FixedAdminVerifier::new(account, passwords);
    Ok(AuthGate::new(
        Arc::new(verifier),
        Arc::new(JwtTokenService::from_env()),
    ))
}

fn build_mail_relay(config: &MailConfig) -> anyhow::Result<Arc<dyn MailRelay>> {
    if let Some(api_key) = &config.relay_api_key {
        return http_relay(config, api_key);
    }

    tracing::warn!(
        recipient = %config.recipient.email,
        "No mail relay configured. Contact messages will be logged, not sent."
    );
    Ok(Arc::new(ConsoleMailRelay))
}

#[cfg(feature = "mail")]
fn http_relay(config: &MailConfig, api_key: &str) -> anyhow::Result<Arc<dyn MailRelay>> {
    use whipsaw_infra::HttpMailRelay;
    use whipsaw_infra::mail::HttpRelayConfig;

    let mut relay_config = HttpRelayConfig::new(api_key);
    if let Some(url) = &config.relay_url {
        relay_config.endpoint = url.clone();
    }
    tracing::info!(endpoint = %relay_config.endpoint, "Mail relay configured");

    let relay = HttpMailRelay::new(relay_config).context("Failed to build the mail relay")?;
    Ok(Arc::new(relay))
}

#[cfg(not(feature = "mail"))]
fn http_relay(_config: &MailConfig, _api_key: &str) -> anyhow::Result<Arc<dyn MailRelay>> {
    tracing::warn!("MAIL_RELAY_API_KEY is set but this build has no mail feature. Messages will be logged.");
    Ok(Arc::new(ConsoleMailRelay))
}
