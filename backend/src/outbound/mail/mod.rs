//! Mail adapters.
//!
//! No provider is wired yet; [`TracingMailer`] records each message as a
//! structured log event so welcome mails are visible in development.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{MailError, MailMessage, Mailer};

/// `Mailer` that logs messages instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMailer;

#[async_trait]
impl Mailer for TracingMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            template = message.template.name(),
            context = %message.context,
            "mail queued"
        );
        Ok(())
    }
}
