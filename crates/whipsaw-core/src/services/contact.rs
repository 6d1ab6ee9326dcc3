//! Contact form submissions, delivered through the mail relay.

use std::sync::Arc;

use crate::domain::{ContactMessage, Validate};
use crate::error::DomainError;
use crate::ports::{MailRelay, Mailbox, OutboundEmail};

pub struct ContactService {
    relay: Arc<dyn MailRelay>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl ContactService {
    pub fn new(relay: Arc<dyn MailRelay>, sender: Mailbox, recipient: Mailbox) -> Self {
        Self {
            relay,
            sender,
            recipient,
        }
    }

    /// Validate the submission, notify the studio inbox, then thank the visitor.
    ///
    /// There is no retry queue: a failed notification surfaces as
    /// [`DomainError::MailDelivery`] and the visitor resubmits. The
    /// acknowledgement is only logged on failure since the studio already
    /// has the message.
    pub async fn submit(&self, message: ContactMessage) -> Result<(), DomainError> {
        message.validate()?;

        let email = self.compose(&message);
        self.relay.send(email).await.map_err(|e| {
            tracing::error!(error = %e, "Contact notification could not be delivered");
            DomainError::MailDelivery(e.to_string())
        })?;
        tracing::info!(recipient = %self.recipient.email, "Contact notification sent");

        let reply = self.compose_acknowledgement(&message);
        if let Err(e) = self.relay.send(reply).await {
            tracing::warn!(error = %e, "Contact acknowledgement could not be delivered");
        }
        Ok(())
    }

    /// Build the notification for the studio inbox. Replies go to the visitor.
    pub fn compose(&self, message: &ContactMessage) -> OutboundEmail {
        let name = message.name.trim();
        let email = message.email.trim();
        let body = message.message.trim();

        let text_body = format!("Name: {name}\nEmail: {email}\nMessage:\n{body}\n");

        let html_body = format!(
            "<!DOCTYPE html>\n<html>\n<body style=\"font-family: Arial, sans-serif; color: #333;\">\n\
             <h2>New message from the Whipsaw website</h2>\n\
             <p><strong>Name:</strong> {}</p>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <div style=\"border: 1px solid #e0e0e0; padding: 15px;\">{}</div>\n\
             </body>\n</html>\n",
            escape_html(name),
            escape_html(email),
            escape_html(body).replace('\n', "<br>"),
        );

        OutboundEmail {
            from: self.sender.clone(),
            to: self.recipient.clone(),
            reply_to: Some(Mailbox::named(name, email)),
            subject: format!("Whipsaw Contact: new message from {name}"),
            html_body,
            text_body,
        }
    }

    /// Build the thank-you reply sent back to the visitor, quoting their message.
    pub fn compose_acknowledgement(&self, message: &ContactMessage) -> OutboundEmail {
        let name = message.name.trim();
        let email = message.email.trim();
        let body = message.message.trim();

        let text_body = format!(
            "Hello {name},\n\nThank you for reaching out to us. We have received your message \
             and will get back to you as soon as possible.\n\nYour message:\n{body}\n\n\
             Best regards,\n{}\n",
            self.signature()
        );

        let html_body = format!(
            "<!DOCTYPE html>\n<html>\n<body style=\"font-family: Arial, sans-serif; color: #333;\">\n\
             <h2>Thank You for Contacting Whipsaw</h2>\n\
             <p>Hello {},</p>\n\
             <p>Thank you for reaching out to us. We have received your message and will get \
             back to you as soon as possible.</p>\n\
             <div style=\"border: 1px solid #e0e0e0; padding: 15px;\">\
             <p><strong>Your message:</strong></p><p>{}</p></div>\n\
             <p>Best regards,<br>{}</p>\n\
             <p style=\"font-size: 12px; color: #777;\">This is an automated response to your \
             inquiry. Please do not reply to this email.</p>\n\
             </body>\n</html>\n",
            escape_html(name),
            escape_html(body).replace('\n', "<br>"),
            escape_html(self.signature()),
        );

        OutboundEmail {
            from: self.sender.clone(),
            to: Mailbox::named(name, email),
            reply_to: Some(self.sender.clone()),
            subject: format!("Whipsaw Contact: Thank you for your message, {name}"),
            html_body,
            text_body,
        }
    }

    fn signature(&self) -> &str {
        self.sender.name.as_deref().unwrap_or("The Whipsaw Team")
    }
}

/// Escape text for inclusion in an HTML body.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
