//! Company logo lookup.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Name of the fallback logo inside the logo directory.
pub const DEFAULT_LOGO: &str = "default.png";

/// Finds the logo to draw for `company`.
///
/// Tries `{logo_dir}/{company}.png`, then `{logo_dir}/default.png`. Returns
/// `None` when neither exists; the paystub is then drawn without a logo.
pub fn resolve_logo(logo_dir: &Path, company: &str) -> Option<PathBuf> {
    let company_logo = logo_dir.join(format!("{}.png", sanitize_filename::sanitize(company)));
    if company_logo.is_file() {
        return Some(company_logo);
    }

    let fallback = logo_dir.join(DEFAULT_LOGO);
    if fallback.is_file() {
        debug!(company = %company, "Company logo not found, using default logo");
        return Some(fallback);
    }

    debug!(company = %company, logo_dir = %logo_dir.display(), "No logo available");
    None
}
