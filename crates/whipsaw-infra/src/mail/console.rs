//! Console mail relay - logs messages instead of sending them (for development).

use async_trait::async_trait;

use whipsaw_core::ports::{MailError, MailRelay, OutboundEmail};

pub struct ConsoleMailRelay;

#[async_trait]
impl MailRelay for ConsoleMailRelay {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to.email,
            reply_to = email.reply_to.as_ref().map(|m| m.email.as_str()).unwrap_or("-"),
            subject = %email.subject,
            body = %email.text_body,
            "Mail relay not configured; message logged instead of sent"
        );
        Ok(())
    }
}
