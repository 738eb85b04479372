//! Mail transport seam.
//!
//! [`Mailer`] is the only place network I/O happens. The SMTP
//! implementation wraps `lettre`'s async transport; tests substitute an
//! in-memory recorder.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::SmtpSettings;
use crate::error::{PaystubError, PaystubResult};

/// Failure reported by a [`Mailer`].
#[derive(Debug, Error)]
pub enum MailerError {
    /// The mail-submission protocol rejected or could not complete the exchange.
    #[error("{0}")]
    Transport(String),
}

/// Sends a fully built message.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hands `message` to the transport.
    async fn send(&self, message: Message) -> Result<(), MailerError>;
}

/// SMTP mailer using STARTTLS and optional credentials.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Builds the transport. No connection is opened until the first send.
    pub fn from_settings(settings: &SmtpSettings) -> PaystubResult<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| PaystubError::InvalidSetting {
                name: "SMTP_SERVER".to_string(),
                message: e.to_string(),
            })?
            .port(settings.port);

        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: Message) -> Result<(), MailerError> {
        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| MailerError::Transport(e.to_string()))
    }
}
