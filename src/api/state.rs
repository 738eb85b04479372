//! Application state for the paystub mailer API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::batch::BatchProcessor;
use crate::config::Settings;
use crate::notify::{Mailer, Notifier};
use crate::paystub::{PaystubRenderer, PaystubStore};

/// Shared application state.
///
/// Contains the settings loaded at startup and the batch processor wired
/// from them.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<Settings>,
    processor: Arc<BatchProcessor>,
}

impl AppState {
    /// Wires the pipeline from `settings`, sending mail through `mailer`.
    pub fn new(settings: Settings, mailer: Arc<dyn Mailer>) -> Self {
        let processor = BatchProcessor::new(
            PaystubRenderer::new(settings.logo_dir.clone()),
            PaystubStore::new(settings.output_dir.clone()),
            Notifier::new(mailer, settings.smtp.from_email.clone()),
            settings.cc_recipients.clone(),
        );

        Self {
            settings: Arc::new(settings),
            processor: Arc::new(processor),
        }
    }

    /// Overrides the minimum spacing between sends.
    pub fn with_send_interval(self, interval: Duration) -> Self {
        let processor = (*self.processor).clone().with_send_interval(interval);
        Self {
            settings: self.settings,
            processor: Arc::new(processor),
        }
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the batch processor.
    pub fn processor(&self) -> &BatchProcessor {
        &self.processor
    }
}
