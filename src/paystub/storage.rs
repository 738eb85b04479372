//! Output directory for rendered paystubs.
//!
//! The directory is append-only. Each stored file gets a random six-hex
//! prefix so identical names from concurrent uploads do not collide.

use std::path::PathBuf;

use tracing::debug;
use uuid::Uuid;

use crate::error::{PaystubError, PaystubResult};

use super::renderer::RenderedPaystub;

/// Writes rendered paystubs under a fixed directory.
#[derive(Debug, Clone)]
pub struct PaystubStore {
    output_dir: PathBuf,
}

impl PaystubStore {
    /// Creates a store rooted at `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Persists `paystub` as `{random6}_{file_name}` and returns its path.
    ///
    /// Files stored for other rows are never touched, even on failure.
    pub async fn store(&self, paystub: &RenderedPaystub) -> PaystubResult<PathBuf> {
        let path = self
            .output_dir
            .join(format!("{}_{}", random_prefix(), paystub.file_name));

        tokio::fs::write(&path, &paystub.bytes)
            .await
            .map_err(|e| PaystubError::Storage {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        debug!(path = %path.display(), "Stored paystub");
        Ok(path)
    }
}

fn random_prefix() -> String {
    Uuid::new_v4().simple().to_string()[..6].to_string()
}
