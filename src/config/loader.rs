//! Settings resolution.
//!
//! Values are looked up by environment variable name first and fall back to
//! the optional YAML file, then to built-in defaults. Only the API
//! credentials are mandatory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PaystubError, PaystubResult};

use super::types::{
    AuthCredentials, DEFAULT_BIND_ADDR, DEFAULT_CC_EMAIL, DEFAULT_FROM_EMAIL, DEFAULT_LOGO_DIR,
    DEFAULT_OUTPUT_DIR, DEFAULT_SMTP_PORT, DEFAULT_SMTP_SERVER, Settings, SettingsFile,
    SmtpSettings,
};

/// Environment variable naming an optional YAML settings file.
pub const CONFIG_FILE_ENV: &str = "PAYSTUB_CONFIG";

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// If `PAYSTUB_CONFIG` names a YAML file, it is read first and every
    /// environment variable that is set overrides the file's value. Call
    /// `dotenvy::dotenv()` beforehand to honour a `.env` file.
    ///
    /// # Errors
    ///
    /// Fails with `MissingSetting` when `AUTH_USERNAME` or `AUTH_PASSWORD`
    /// is absent, and with `InvalidSetting` when a typed value (such as
    /// `SMTP_PORT`) does not parse.
    pub fn from_env() -> PaystubResult<Self> {
        let file = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::read_file(Path::new(&path))?,
            _ => SettingsFile::default(),
        };
        Self::resolve(file, |name| std::env::var(name).ok())
    }

    /// Loads settings from a YAML file only.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use paystub_mailer::config::Settings;
    ///
    /// let settings = Settings::load("./settings.yaml")?;
    /// println!("Sending as {}", settings.smtp.from_email);
    /// # Ok::<(), paystub_mailer::error::PaystubError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> PaystubResult<Self> {
        let file = Self::read_file(path.as_ref())?;
        Self::resolve(file, |_| None)
    }

    /// Resolves settings from an arbitrary variable lookup.
    ///
    /// Used by tests and embedders that do not want to touch the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> PaystubResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(SettingsFile::default(), lookup)
    }

    /// Creates the logo and output directories if they are missing.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.logo_dir)?;
        fs::create_dir_all(&self.output_dir)
    }

    fn read_file(path: &Path) -> PaystubResult<SettingsFile> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PaystubError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PaystubError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn resolve<F>(file: SettingsFile, lookup: F) -> PaystubResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let username = var("AUTH_USERNAME")
            .or(file.auth_username)
            .ok_or_else(|| PaystubError::MissingSetting {
                name: "AUTH_USERNAME".to_string(),
            })?;
        let password = var("AUTH_PASSWORD")
            .or(file.auth_password)
            .ok_or_else(|| PaystubError::MissingSetting {
                name: "AUTH_PASSWORD".to_string(),
            })?;

        let port = match var("SMTP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| PaystubError::InvalidSetting {
                name: "SMTP_PORT".to_string(),
                message: e.to_string(),
            })?,
            None => file.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
        };

        let cc_recipients = match var("CC_EMAILS") {
            Some(raw) => split_list(&raw),
            None => file
                .cc_emails
                .unwrap_or_else(|| vec![DEFAULT_CC_EMAIL.to_string()]),
        };

        let debug = match var("DEBUG") {
            Some(raw) => parse_flag(&raw),
            None => file.debug.unwrap_or(false),
        };

        let settings = Settings {
            auth: AuthCredentials { username, password },
            smtp: SmtpSettings {
                host: var("SMTP_SERVER")
                    .or(file.smtp_server)
                    .unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string()),
                port,
                username: var("SMTP_USERNAME").or(file.smtp_username),
                password: var("SMTP_PASSWORD").or(file.smtp_password),
                from_email: var("FROM_EMAIL")
                    .or(file.from_email)
                    .unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
            },
            cc_recipients,
            debug,
            logo_dir: var("LOGO_DIR")
                .map(PathBuf::from)
                .or(file.logo_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGO_DIR)),
            output_dir: var("PAYSTUB_OUTPUT_DIR")
                .map(PathBuf::from)
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            bind_addr: var("BIND_ADDR")
                .or(file.bind_addr)
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        };

        debug!(settings = ?settings, "Resolved settings");
        Ok(settings)
    }
}

/// Accepts `true`, `1` and `t` in any case; everything else is false.
fn parse_flag(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "true" | "1" | "t")
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
