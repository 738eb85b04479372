//! Configuration types for the paystub mailer.
//!
//! [`Settings`] is the resolved, validated configuration handed to the
//! components at startup. [`SettingsFile`] mirrors the optional YAML file
//! and is only an input to resolution.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Default SMTP relay used when `SMTP_SERVER` is not set.
pub const DEFAULT_SMTP_SERVER: &str = "sandbox.smtp.mailtrap.io";

/// Default SMTP submission port.
pub const DEFAULT_SMTP_PORT: u16 = 2525;

/// Default sender address.
pub const DEFAULT_FROM_EMAIL: &str = "payroll@company.com";

/// Address copied on every paystub email unless overridden.
pub const DEFAULT_CC_EMAIL: &str = "hr@company.com";

/// Default directory holding company logos.
pub const DEFAULT_LOGO_DIR: &str = "logos";

/// Default directory receiving rendered paystubs.
pub const DEFAULT_OUTPUT_DIR: &str = "generated_paystubs";

/// Default listen address for the HTTP server.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// The single shared credential pair guarding the API.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthCredentials {
    /// Expected basic-auth username.
    pub username: String,
    /// Expected basic-auth password.
    pub password: String,
}

impl AuthCredentials {
    /// Returns true when the supplied pair matches exactly.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl fmt::Debug for AuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outbound mail transport settings.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    /// SMTP relay host name.
    pub host: String,
    /// SMTP relay port.
    pub port: u16,
    /// Optional SMTP login.
    pub username: Option<String>,
    /// Optional SMTP password.
    pub password: Option<String>,
    /// Sender address placed in the `From` header.
    pub from_email: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("from_email", &self.from_email)
            .finish()
    }
}

/// Process-wide configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// API credentials.
    pub auth: AuthCredentials,
    /// Mail transport settings.
    pub smtp: SmtpSettings,
    /// Addresses copied on every paystub email.
    pub cc_recipients: Vec<String>,
    /// Whether responses include per-row file and email detail.
    pub debug: bool,
    /// Directory searched for `{company}.png` and `default.png`.
    pub logo_dir: PathBuf,
    /// Directory receiving rendered paystubs.
    pub output_dir: PathBuf,
    /// Listen address for the HTTP server.
    pub bind_addr: String,
}

/// Optional YAML settings file. Every key is optional; environment
/// variables take precedence over values found here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsFile {
    /// See `AUTH_USERNAME`.
    pub auth_username: Option<String>,
    /// See `AUTH_PASSWORD`.
    pub auth_password: Option<String>,
    /// See `SMTP_SERVER`.
    pub smtp_server: Option<String>,
    /// See `SMTP_PORT`.
    pub smtp_port: Option<u16>,
    /// See `SMTP_USERNAME`.
    pub smtp_username: Option<String>,
    /// See `SMTP_PASSWORD`.
    pub smtp_password: Option<String>,
    /// See `FROM_EMAIL`.
    pub from_email: Option<String>,
    /// See `CC_EMAILS`.
    pub cc_emails: Option<Vec<String>>,
    /// See `DEBUG`.
    pub debug: Option<bool>,
    /// See `LOGO_DIR`.
    pub logo_dir: Option<PathBuf>,
    /// See `PAYSTUB_OUTPUT_DIR`.
    pub output_dir: Option<PathBuf>,
    /// See `BIND_ADDR`.
    pub bind_addr: Option<String>,
}
