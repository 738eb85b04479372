//! Paystub rendering and storage.
//!
//! This module turns a validated [`crate::models::PayrollRecord`] into a
//! localized, company-branded single-page PDF and stores it under the
//! output directory.
//!
//! # Example
//!
//! ```no_run
//! use paystub_mailer::paystub::{Locale, PaystubRenderer, PaystubStore};
//! # async fn run(record: paystub_mailer::models::PayrollRecord) -> paystub_mailer::error::PaystubResult<()> {
//! let renderer = PaystubRenderer::new("logos");
//! let store = PaystubStore::new("generated_paystubs");
//!
//! let paystub = renderer.render(&record, "atdev", Locale::from_country_code("do"))?;
//! let path = store.store(&paystub).await?;
//! println!("Stored {}", path.display());
//! # Ok(())
//! # }
//! ```

mod labels;
mod layout;
mod logo;
mod renderer;
mod storage;

pub use labels::{Locale, PaystubLabels};
pub use layout::{AmountTable, PaystubLayout, deduction, money};
pub use logo::{DEFAULT_LOGO, resolve_logo};
pub use renderer::{PaystubRenderer, RenderedPaystub, paystub_file_name};
pub use storage::PaystubStore;
