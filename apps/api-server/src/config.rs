//! Application configuration loaded from environment variables.

use std::env;

use whipsaw_core::ports::Mailbox;

#[cfg(feature = "postgres")]
use whipsaw_infra::database::DatabaseConfig;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:5174";
const DEFAULT_CONTACT_ADDRESS: &str = "contact@whipsaw.studio";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    /// `DATABASE_URL` was given but this build cannot use it.
    #[cfg(not(feature = "postgres"))]
    pub database_url: Option<String>,
    pub run_migrations: bool,
    pub seed_sample_content: bool,
    pub cors_origins: Vec<String>,
    pub mail: MailConfig,
}

/// Outbound mail relay and contact-form addressing.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub relay_url: Option<String>,
    /// No key means messages are logged instead of sent.
    pub relay_api_key: Option<String>,
    pub sender: Mailbox,
    pub recipient: Mailbox,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        #[cfg(feature = "postgres")]
        let database = non_empty("DATABASE_URL").map(|url| {
            let mut config = DatabaseConfig::new(url);
            config.max_connections = parse_or("DB_MAX_CONNECTIONS", config.max_connections);
            config.min_connections = parse_or("DB_MIN_CONNECTIONS", config.min_connections);
            config
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 5000),
            #[cfg(feature = "postgres")]
            database,
            #[cfg(not(feature = "postgres"))]
            database_url: non_empty("DATABASE_URL"),
            run_migrations: flag("RUN_MIGRATIONS", true),
            seed_sample_content: flag("SEED_SAMPLE_CONTENT", false),
            cors_origins: parse_origins(
                &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
            ),
            mail: MailConfig::from_env(),
        }
    }
}

impl MailConfig {
    fn from_env() -> Self {
        let sender_email =
            non_empty("CONTACT_SENDER_EMAIL").unwrap_or_else(|| DEFAULT_CONTACT_ADDRESS.into());
        let sender_name =
            non_empty("CONTACT_SENDER_NAME").unwrap_or_else(|| "Whipsaw Website".into());
        let recipient_email =
            non_empty("CONTACT_RECIPIENT_EMAIL").unwrap_or_else(|| DEFAULT_CONTACT_ADDRESS.into());

        Self {
            relay_url: non_empty("MAIL_RELAY_URL"),
            relay_api_key: non_empty("MAIL_RELAY_API_KEY"),
            sender: Mailbox::named(sender_name, sender_email),
            recipient: Mailbox::new(recipient_email),
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no" | "off"))
        .unwrap_or(default)
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(DEFAULT_CORS_ORIGINS),
            vec!["http://localhost:5173", "http://localhost:5174"]
        );
        assert_eq!(
            parse_origins(" https://whipsaw.studio/ ,, "),
            vec!["https://whipsaw.studio"]
        );
        assert!(parse_origins("").is_empty());
    }
}
