//! Paystub email delivery.
//!
//! [`Notifier::send_email`] never returns an error: every outcome is a
//! [`DeliveryReport`]. A missing attachment is detected before any message
//! is built or any transport call is made.

use std::path::Path;
use std::sync::Arc;

use lettre::Message;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::DeliveryStatus;

use super::mailer::{Mailer, MailerError};

/// Why an email was not sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// The attachment path does not exist.
    #[error("Attachment not found: {path}")]
    AttachmentMissing {
        /// The missing path.
        path: String,
    },
    /// The mail-submission protocol failed.
    #[error("SMTP error: {0}")]
    Transport(String),
    /// Address parsing, message assembly, attachment I/O and the like.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<MailerError> for NotifyError {
    fn from(error: MailerError) -> Self {
        match error {
            MailerError::Transport(message) => NotifyError::Transport(message),
        }
    }
}

/// Outcome of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Destination address.
    pub email: String,
    /// `Ok` when the transport accepted the message.
    pub result: Result<(), NotifyError>,
}

impl DeliveryReport {
    /// Success or failure tag.
    pub fn status(&self) -> DeliveryStatus {
        match self.result {
            Ok(()) => DeliveryStatus::Success,
            Err(_) => DeliveryStatus::Failed,
        }
    }

    /// Human-readable result text.
    pub fn message(&self) -> String {
        match &self.result {
            Ok(()) => "Email sent successfully".to_string(),
            Err(e) => e.to_string(),
        }
    }
}

/// Sends paystub emails from a fixed sender address.
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    from: String,
}

impl Notifier {
    /// Creates a notifier sending as `from` through `mailer`.
    pub fn new(mailer: Arc<dyn Mailer>, from: impl Into<String>) -> Self {
        Self {
            mailer,
            from: from.into(),
        }
    }

    /// Sends one plain-text email, optionally with an attachment and CCs.
    ///
    /// The attachment is sent under its base name. Multiple CC addresses end
    /// up in a single `Cc` header separated by `, `.
    pub async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: Option<&Path>,
        cc: &[String],
    ) -> DeliveryReport {
        let result = self.try_send(to, subject, body, attachment, cc).await;

        match &result {
            Ok(()) => info!(email = %to, "Email sent"),
            Err(e) => warn!(email = %to, error = %e, "Email not sent"),
        }

        DeliveryReport {
            email: to.to_string(),
            result,
        }
    }

    async fn try_send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: Option<&Path>,
        cc: &[String],
    ) -> Result<(), NotifyError> {
        if let Some(path) = attachment {
            if !path.exists() {
                return Err(NotifyError::AttachmentMissing {
                    path: path.display().to_string(),
                });
            }
        }

        let message = self.build_message(to, subject, body, attachment, cc).await?;
        self.mailer.send(message).await?;
        Ok(())
    }

    async fn build_message(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: Option<&Path>,
        cc: &[String],
    ) -> Result<Message, NotifyError> {
        let mut builder = Message::builder()
            .from(parse_mailbox(&self.from)?)
            .to(parse_mailbox(to)?)
            .date_now()
            .subject(subject);
        for address in cc {
            builder = builder.cc(parse_mailbox(address)?);
        }

        let mut parts = MultiPart::mixed().singlepart(SinglePart::plain(body.to_string()));
        if let Some(path) = attachment {
            parts = parts.singlepart(attachment_part(path).await?);
        }

        builder.multipart(parts).map_err(unexpected)
    }
}

fn unexpected(e: impl std::fmt::Display) -> NotifyError {
    NotifyError::Unexpected(e.to_string())
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| NotifyError::Unexpected(format!("invalid address '{}': {}", address, e)))
}

async fn attachment_part(path: &Path) -> Result<SinglePart, NotifyError> {
    let bytes = tokio::fs::read(path).await.map_err(unexpected)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());

    let content_type = if name.to_ascii_lowercase().ends_with(".pdf") {
        ContentType::parse("application/pdf").map_err(unexpected)?
    } else {
        ContentType::parse("application/octet-stream").map_err(unexpected)?
    };

    Ok(Attachment::new(name).body(bytes, content_type))
}
