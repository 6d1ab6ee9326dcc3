//! Transactional-email relay reached over HTTPS.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use whipsaw_core::ports::{MailError, MailRelay, Mailbox, OutboundEmail};

/// Default relay endpoint (Brevo transactional email API).
pub const DEFAULT_RELAY_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug, Clone)]
pub struct HttpRelayConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl HttpRelayConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_RELAY_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(15),
        }
    }
}

pub struct HttpMailRelay {
    client: reqwest::Client,
    config: HttpRelayConfig,
}

impl HttpMailRelay {
    pub fn new(config: HttpRelayConfig) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }
}

fn mailbox(mailbox: &Mailbox) -> Value {
    match &mailbox.name {
        Some(name) => json!({ "email": mailbox.email, "name": name }),
        None => json!({ "email": mailbox.email }),
    }
}

/// The JSON document the relay expects.
pub(crate) fn relay_payload(email: &OutboundEmail) -> Value {
    let mut payload = json!({
        "sender": mailbox(&email.from),
        "to": [mailbox(&email.to)],
        "subject": email.subject,
        "htmlContent": email.html_body,
        "textContent": email.text_body,
    });
    if let Some(reply_to) = &email.reply_to {
        payload["replyTo"] = mailbox(reply_to);
    }
    payload
}

#[async_trait]
impl MailRelay for HttpMailRelay {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("api-key", &self.config.api_key)
            .json(&relay_payload(&email))
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        tracing::debug!(status = status.as_u16(), "Relay accepted message");
        Ok(())
    }
}
