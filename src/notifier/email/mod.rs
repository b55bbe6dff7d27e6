// notifier/email: digest rendering and delivery
pub mod digest;
pub mod sender;

pub use digest::{Digest, render_digest};
pub use sender::SmtpMailer;

use crate::model::{JobRecord, NotifyError};
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

/// Something that can deliver a rendered digest.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, digest: &Digest) -> Result<(), NotifyError>;
}

pub struct EmailNotifier<T: MailTransport> {
    transport: T,
    recent_only: bool,
}

impl<T: MailTransport> EmailNotifier<T> {
    pub fn new(transport: T, recent_only: bool) -> Self {
        Self {
            transport,
            recent_only,
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends one digest covering `jobs`. Nothing is sent, and the transport
    /// is never touched, when `jobs` is empty.
    pub async fn notify(&self, jobs: &[JobRecord]) -> Result<usize, NotifyError> {
        if jobs.is_empty() {
            info!("No new jobs to send.");
            return Ok(0);
        }
        for job in jobs {
            info!("Adding job: {} at {}", job.title, job.company);
        }
        let digest = render_digest(jobs, self.recent_only, Utc::now())
            .map_err(|e| NotifyError::Message(e.to_string()))?;
        self.transport.send(&digest).await?;
        info!("✅ Email sent successfully with {} jobs!", jobs.len());
        Ok(jobs.len())
    }
}
