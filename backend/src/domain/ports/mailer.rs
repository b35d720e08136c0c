//! Port for outbound transactional mail.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::EmailAddress;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail adapters.
    pub enum MailError {
        /// The provider refused or failed to accept the message.
        Delivery { message: String } => "mail delivery failed: {message}",
    }
}

/// Templates the provider knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailTemplate {
    /// Greeting sent after an account is created.
    Welcome,
}

impl MailTemplate {
    /// Template name understood by the provider.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
        }
    }
}

/// A rendered-on-send message.
#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    /// Recipient address.
    pub to: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// Template to render.
    pub template: MailTemplate,
    /// Values substituted into the template.
    pub context: Value,
}

/// Port for sending transactional mail.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hand a message to the provider.
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}
