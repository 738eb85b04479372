//! Configuration loading for the paystub mailer.
//!
//! Settings are read once at startup, from the environment (optionally
//! backed by a YAML file), and passed by reference to the components that
//! need them.
//!
//! # Example
//!
//! ```no_run
//! use paystub_mailer::config::Settings;
//!
//! let settings = Settings::from_env().unwrap();
//! settings.ensure_dirs().unwrap();
//! ```

mod loader;
mod types;

pub use loader::CONFIG_FILE_ENV;
pub use types::{
    AuthCredentials, DEFAULT_BIND_ADDR, DEFAULT_CC_EMAIL, DEFAULT_FROM_EMAIL, DEFAULT_LOGO_DIR,
    DEFAULT_OUTPUT_DIR, DEFAULT_SMTP_PORT, DEFAULT_SMTP_SERVER, Settings, SettingsFile,
    SmtpSettings,
};
