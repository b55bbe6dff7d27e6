// SMTP delivery of digests over STARTTLS
use super::MailTransport;
use super::digest::Digest;
use crate::config::EmailConfig;
use crate::model::NotifyError;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport. No connection is made until the first send.
    pub fn new(cfg: &EmailConfig) -> Result<Self, NotifyError> {
        let from: Mailbox = cfg
            .sender
            .parse()
            .map_err(|e: lettre::address::AddressError| NotifyError::Address(e.to_string()))?;
        let to: Mailbox = cfg
            .recipient
            .parse()
            .map_err(|e: lettre::address::AddressError| NotifyError::Address(e.to_string()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.smtp_server)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(cfg.smtp_port)
            .credentials(Credentials::new(cfg.sender.clone(), cfg.password.clone()))
            .build();

        Ok(Self { transport, from, to })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, digest: &Digest) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(digest.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                digest.plain.clone(),
                digest.html.clone(),
            ))
            .map_err(|e| NotifyError::Message(e.to_string()))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        info!("SMTP server accepted digest [{}]", response.code());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(sender: &str) -> EmailConfig {
        EmailConfig {
            sender: sender.into(),
            password: "secret".into(),
            recipient: "me@example.com".into(),
            smtp_server: "smtp.example.com".into(),
            smtp_port: 587,
        }
    }

    #[tokio::test]
    async fn builds_without_connecting() {
        assert!(SmtpMailer::new(&config("bot@example.com")).is_ok());
    }

    #[tokio::test]
    async fn rejects_malformed_sender() {
        let err = SmtpMailer::new(&config("not an address")).err().unwrap();
        assert!(matches!(err, NotifyError::Address(_)));
    }
}
