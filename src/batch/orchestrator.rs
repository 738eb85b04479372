//! Row-by-row batch processing.
//!
//! Every row runs validate → render/store → notify, strictly in source
//! order. A failure at any stage only affects its own row. Sends are spaced
//! by a minimum interval across the whole batch.

use std::path::Path;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::error::{PaystubError, PaystubResult};
use crate::models::{BatchReport, EmailResult, GeneratedFile, PayrollRecord, RawRow, RowOutcome};
use crate::notify::{Notifier, paystub_email};
use crate::paystub::{Locale, PaystubRenderer, PaystubStore};
use crate::validation::validate_row;

use super::csv_input::parse_rows;

/// Minimum spacing between two sends in one batch.
pub const DEFAULT_SEND_INTERVAL: Duration = Duration::from_secs(1);

/// Per-request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Two-letter country code selecting the locale.
    pub country: String,
    /// Company identifier selecting the logo.
    pub company: String,
    /// Whether to email the rendered paystubs.
    pub send_emails: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            country: "do".to_string(),
            company: "atdev".to_string(),
            send_emails: true,
        }
    }
}

/// Drives the validate → render → notify pipeline for one upload.
#[derive(Clone)]
pub struct BatchProcessor {
    renderer: PaystubRenderer,
    store: PaystubStore,
    notifier: Notifier,
    cc_recipients: Vec<String>,
    send_interval: Duration,
}

impl BatchProcessor {
    /// Creates a processor. Every email copies `cc_recipients`.
    pub fn new(
        renderer: PaystubRenderer,
        store: PaystubStore,
        notifier: Notifier,
        cc_recipients: Vec<String>,
    ) -> Self {
        Self {
            renderer,
            store,
            notifier,
            cc_recipients,
            send_interval: DEFAULT_SEND_INTERVAL,
        }
    }

    /// Overrides the minimum spacing between sends.
    pub fn with_send_interval(mut self, interval: Duration) -> Self {
        self.send_interval = interval;
        self
    }

    /// Parses `csv` and processes every row.
    ///
    /// # Errors
    ///
    /// Only an unreadable CSV fails the call; row-level problems end up in
    /// the report.
    pub async fn process_csv(&self, csv: &[u8], options: &BatchOptions) -> PaystubResult<BatchReport> {
        let rows = parse_rows(csv)?;
        let outcomes = self.process_rows(rows, options).await;
        let report = BatchReport::from_outcomes(&outcomes);

        info!(
            rows = outcomes.len(),
            employee_count = report.employee_count,
            generated_paystubs = report.generated_paystubs,
            emails_sent = report.emails_sent,
            errors = report.errors.len(),
            "Batch processed"
        );
        Ok(report)
    }

    /// Processes already-parsed rows, returning one outcome per row in order.
    pub async fn process_rows(&self, rows: Vec<RawRow>, options: &BatchOptions) -> Vec<RowOutcome> {
        let locale = Locale::from_country_code(&options.country);
        let mut pacer = Pacer::new(self.send_interval);
        let mut outcomes = Vec::with_capacity(rows.len());

        for (index, raw) in rows.into_iter().enumerate() {
            let outcome = self
                .process_row(index + 1, raw, locale, options, &mut pacer)
                .await;
            outcomes.push(outcome);
        }

        outcomes
    }

    async fn process_row(
        &self,
        row: usize,
        raw: RawRow,
        locale: Locale,
        options: &BatchOptions,
        pacer: &mut Pacer,
    ) -> RowOutcome {
        let record = match validate_row(row, &raw) {
            Ok(record) => record,
            Err(failure) => {
                warn!(row, error = %failure, "Row rejected");
                return RowOutcome::Rejected {
                    row,
                    data: raw,
                    reason: failure.to_string(),
                };
            }
        };

        let path = match self.render_and_store(&record, &options.company, locale).await {
            Ok(path) => path,
            Err(e) => {
                warn!(row, employee = %record.full_name, error = %e, "Paystub not generated");
                let reason = match e {
                    PaystubError::Render { message } => message,
                    other => other.to_string(),
                };
                return RowOutcome::RenderFailed {
                    row,
                    employee: record.full_name,
                    reason,
                };
            }
        };

        let delivery = if options.send_emails {
            Some(self.deliver(&record, &path, locale, pacer).await)
        } else {
            None
        };

        RowOutcome::Completed {
            row,
            file: GeneratedFile {
                employee: record.full_name,
                file: path.display().to_string(),
                email: record.email,
            },
            delivery,
        }
    }

    async fn render_and_store(
        &self,
        record: &PayrollRecord,
        company: &str,
        locale: Locale,
    ) -> PaystubResult<std::path::PathBuf> {
        let renderer = self.renderer.clone();
        let owned_record = record.clone();
        let owned_company = company.to_string();

        let paystub = tokio::task::spawn_blocking(move || {
            renderer.render(&owned_record, &owned_company, locale)
        })
        .await
        .map_err(|e| PaystubError::Render {
            message: e.to_string(),
        })??;

        self.store.store(&paystub).await
    }

    async fn deliver(
        &self,
        record: &PayrollRecord,
        path: &Path,
        locale: Locale,
        pacer: &mut Pacer,
    ) -> EmailResult {
        let template = paystub_email(&record.full_name, locale);

        pacer.wait().await;
        let report = self
            .notifier
            .send_email(
                &record.email,
                &template.subject,
                &template.body,
                Some(path),
                &self.cc_recipients,
            )
            .await;

        EmailResult {
            employee: record.full_name.clone(),
            email: record.email.clone(),
            status: report.status(),
            message: report.message(),
        }
    }
}

/// Enforces a minimum gap between consecutive sends.
struct Pacer {
    interval: Duration,
    last_send: Option<Instant>,
}

impl Pacer {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_send: None,
        }
    }

    async fn wait(&mut self) {
        if let Some(last) = self.last_send {
            tokio::time::sleep_until(last + self.interval).await;
        }
        self.last_send = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BatchStatus, DeliveryStatus, ErrorCategory};
    use crate::notify::{Mailer, MailerError};
    use async_trait::async_trait;
    use lettre::Message;
    use std::sync::{Arc, Mutex};

    const HEADER: &str = "full_name,email,position,health_discount_amount,social_discount_amount,taxes_discount_amount,other_discount_amount,gross_salary,gross_payment,net_payment,period";
    const JOHN: &str = "John Doe,john@example.com,Developer,50.0,100.0,75.0,25.0,3000.0,2800.0,2600.0,2023-12-15";

    #[derive(Default)]
    struct RecordingMailer {
        sent_at: Mutex<Vec<Instant>>,
        subjects: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, message: Message) -> Result<(), MailerError> {
            self.sent_at.lock().unwrap().push(Instant::now());
            let subject = message
                .headers()
                .get_raw("Subject")
                .unwrap_or_default()
                .to_string();
            self.subjects.lock().unwrap().push(subject);
            Ok(())
        }
    }

    fn processor(dir: &Path, mailer: Arc<RecordingMailer>) -> BatchProcessor {
        BatchProcessor::new(
            PaystubRenderer::new(dir.join("logos")),
            PaystubStore::new(dir),
            Notifier::new(mailer, "payroll@company.com"),
            vec!["hr@company.com".to_string()],
        )
    }

    fn csv(rows: &[&str]) -> String {
        let mut out = HEADER.to_string();
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    fn options(send_emails: bool) -> BatchOptions {
        BatchOptions {
            send_emails,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_options() {
        let options = BatchOptions::default();
        assert_eq!(options.country, "do");
        assert_eq!(options.company, "atdev");
        assert!(options.send_emails);
    }

    #[tokio::test]
    async fn test_single_row_without_email() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = Arc::new(RecordingMailer::default());

        let report = processor(dir.path(), mailer.clone())
            .process_csv(csv(&[JOHN]).as_bytes(), &options(false))
            .await
            .unwrap();

        assert_eq!(report.status(), BatchStatus::Success);
        assert_eq!(report.employee_count, 1);
        assert_eq!(report.generated_paystubs, 1);
        assert_eq!(report.emails_sent, 0);
        assert!(report.errors.is_empty());
        assert!(mailer.sent_at.lock().unwrap().is_empty());

        let file = &report.generated_files[0].file;
        assert!(file.ends_with("_paystub_John Doe_2023-12-15.pdf"));
        assert!(Path::new(file).exists());
    }

    #[tokio::test]
    async fn test_invalid_row_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = Arc::new(RecordingMailer::default());
        let bad = "Bad Row,not-an-email,Developer,1,1,1,1,1,1,1,2023-12-15";

        let report = processor(dir.path(), mailer)
            .process_csv(csv(&[bad, JOHN]).as_bytes(), &options(false))
            .await
            .unwrap();

        assert_eq!(report.status(), BatchStatus::PartialSuccess);
        assert_eq!(report.employee_count, 1);
        assert_eq!(report.generated_paystubs, 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].row, 1);
        assert_eq!(report.errors[0].category, ErrorCategory::Validation);
        let data = report.errors[0].data.as_ref().unwrap();
        assert_eq!(data["email"].as_deref(), Some("not-an-email"));
    }

    #[tokio::test]
    async fn test_storage_failure_is_pdf_generation_error() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = Arc::new(RecordingMailer::default());
        let processor = BatchProcessor::new(
            PaystubRenderer::new(dir.path()),
            PaystubStore::new(dir.path().join("missing")),
            Notifier::new(mailer.clone(), "payroll@company.com"),
            vec![],
        );

        let report = processor
            .process_csv(csv(&[JOHN]).as_bytes(), &options(true))
            .await
            .unwrap();

        assert_eq!(report.employee_count, 1);
        assert_eq!(report.generated_paystubs, 0);
        assert_eq!(report.errors[0].category, ErrorCategory::PdfGeneration);
        assert!(report.errors[0].error.starts_with("PDF generation failed: Failed to store"));
        assert!(mailer.sent_at.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_spanish_subject_for_do() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = Arc::new(RecordingMailer::default());

        let report = processor(dir.path(), mailer.clone())
            .with_send_interval(Duration::ZERO)
            .process_csv(csv(&[JOHN]).as_bytes(), &options(true))
            .await
            .unwrap();

        assert_eq!(report.emails_sent, 1);
        assert_eq!(report.email_results[0].status, DeliveryStatus::Success);
        let subjects = mailer.subjects.lock().unwrap();
        assert_eq!(subjects.len(), 1);
        assert!(!subjects[0].contains("Your Paystub"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sends_are_spaced_by_interval() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = Arc::new(RecordingMailer::default());
        let jane = "Jane Roe,jane@example.com,Manager,1,2,3,4,5000,5000,4990,2023-12-15";
        let ana = "Ana Diaz,ana@example.com,Analyst,1,2,3,4,4000,4000,3990,2023-12-15";

        let report = processor(dir.path(), mailer.clone())
            .process_csv(csv(&[JOHN, jane, ana]).as_bytes(), &options(true))
            .await
            .unwrap();

        assert_eq!(report.emails_sent, 3);
        let sent_at = mailer.sent_at.lock().unwrap();
        assert_eq!(sent_at.len(), 3);
        for pair in sent_at.windows(2) {
            assert!(pair[1] - pair[0] >= DEFAULT_SEND_INTERVAL);
        }
    }

    #[tokio::test]
    async fn test_malformed_csv_is_hard_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = Arc::new(RecordingMailer::default());

        let err = processor(dir.path(), mailer)
            .process_csv(b"a,b\n1,2,3\n", &options(false))
            .await
            .unwrap_err();
        assert!(matches!(err, PaystubError::InvalidCsv { .. }));
    }
}
