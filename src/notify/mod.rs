//! Email notification for rendered paystubs.
//!
//! Templates pick the localized subject and body, [`Notifier`] assembles
//! the message and [`Mailer`] carries it to the SMTP relay.

mod mailer;
mod notifier;
mod templates;

pub use mailer::{Mailer, MailerError, SmtpMailer};
pub use notifier::{DeliveryReport, Notifier, NotifyError};
pub use templates::{EmailTemplate, paystub_email};
