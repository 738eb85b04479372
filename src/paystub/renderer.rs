//! PDF drawing.
//!
//! Draws a [`PaystubLayout`] onto a single US Letter page with `printpdf`'s
//! built-in Helvetica fonts. Coordinates are in points from the bottom-left
//! corner.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::Local;
use image::ImageDecoder;
use image::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Pt, Rgb,
};
use tracing::{debug, warn};

use crate::error::{PaystubError, PaystubResult};
use crate::models::PayrollRecord;

use super::labels::Locale;
use super::layout::{AmountTable, PaystubLayout};
use super::logo::resolve_logo;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const LOGO_SIZE: f32 = 100.0;

/// A rendered paystub, not yet stored.
#[derive(Debug, Clone)]
pub struct RenderedPaystub {
    /// Employee's full name.
    pub employee: String,
    /// Employee's email address.
    pub email: String,
    /// Pay period.
    pub period: String,
    /// `paystub_{full_name}_{period}.pdf`, filesystem-safe.
    pub file_name: String,
    /// The PDF document.
    pub bytes: Vec<u8>,
    /// Locale used for the labels.
    pub locale: Locale,
    /// Company whose logo was requested.
    pub company: String,
    /// Whether a logo ended up on the page.
    pub logo_drawn: bool,
}

/// Renders paystubs for a fixed logo directory.
#[derive(Debug, Clone)]
pub struct PaystubRenderer {
    logo_dir: PathBuf,
}

impl PaystubRenderer {
    /// Creates a renderer that looks for logos in `logo_dir`.
    pub fn new(logo_dir: impl Into<PathBuf>) -> Self {
        Self {
            logo_dir: logo_dir.into(),
        }
    }

    /// Renders one record.
    ///
    /// A missing or undecodable logo never fails the render.
    ///
    /// # Errors
    ///
    /// Returns `PaystubError::Render` if the document cannot be assembled
    /// or serialized.
    pub fn render(
        &self,
        record: &PayrollRecord,
        company: &str,
        locale: Locale,
    ) -> PaystubResult<RenderedPaystub> {
        let layout = PaystubLayout::build(record, locale.labels(), Local::now().naive_local());

        let (doc, page, layer) = PdfDocument::new(
            layout.title.as_str(),
            Mm::from(Pt(PAGE_WIDTH)),
            Mm::from(Pt(PAGE_HEIGHT)),
            "Paystub",
        );
        let layer = doc.get_page(page).get_layer(layer);

        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(render_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(render_error)?,
            oblique: doc
                .add_builtin_font(BuiltinFont::HelveticaOblique)
                .map_err(render_error)?,
        };

        let logo_drawn = match resolve_logo(&self.logo_dir, company) {
            Some(path) => match draw_logo(&layer, &path) {
                Ok(()) => true,
                Err(e) => {
                    warn!(logo = %path.display(), error = %e, "Skipping unreadable logo");
                    false
                }
            },
            None => false,
        };

        draw_layout(&layer, &fonts, &layout);

        let bytes = doc.save_to_bytes().map_err(render_error)?;
        debug!(
            employee = %record.full_name,
            size = bytes.len(),
            logo_drawn,
            "Rendered paystub"
        );

        Ok(RenderedPaystub {
            employee: record.full_name.clone(),
            email: record.email.clone(),
            period: record.period.clone(),
            file_name: paystub_file_name(record),
            bytes,
            locale,
            company: company.to_string(),
            logo_drawn,
        })
    }
}

/// Deterministic paystub name: `paystub_{full_name}_{period}.pdf`.
///
/// Path separators and other unsafe characters are stripped from both parts.
///
/// ```
/// use paystub_mailer::paystub::paystub_file_name;
/// # use paystub_mailer::models::PayrollRecord;
/// # use rust_decimal::Decimal;
/// # let record = PayrollRecord {
/// #     full_name: "John Doe".to_string(),
/// #     email: "john@example.com".to_string(),
/// #     position: "Developer".to_string(),
/// #     health_discount_amount: Decimal::ZERO,
/// #     social_discount_amount: Decimal::ZERO,
/// #     taxes_discount_amount: Decimal::ZERO,
/// #     other_discount_amount: Decimal::ZERO,
/// #     gross_salary: Decimal::ZERO,
/// #     gross_payment: Decimal::ZERO,
/// #     net_payment: Decimal::ZERO,
/// #     period: "2023-12-15".to_string(),
/// # };
/// assert_eq!(paystub_file_name(&record), "paystub_John Doe_2023-12-15.pdf");
/// ```
pub fn paystub_file_name(record: &PayrollRecord) -> String {
    format!(
        "paystub_{}_{}.pdf",
        sanitize_filename::sanitize(&record.full_name),
        sanitize_filename::sanitize(&record.period)
    )
}

fn render_error(e: impl std::fmt::Display) -> PaystubError {
    PaystubError::Render {
        message: e.to_string(),
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

fn text(layer: &PdfLayerReference, value: &str, size: f32, x: f32, y: f32, font: &IndirectFontRef) {
    layer.use_text(value, size, Mm::from(Pt(x)), Mm::from(Pt(y)), font);
}

fn rule(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32) {
    let line = Line {
        points: vec![
            (Point::new(Mm::from(Pt(x1)), Mm::from(Pt(y))), false),
            (Point::new(Mm::from(Pt(x2)), Mm::from(Pt(y))), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

fn draw_logo(layer: &PdfLayerReference, path: &Path) -> Result<(), image::ImageError> {
    let decoder = PngDecoder::new(BufReader::new(File::open(path)?))?;
    let (width_px, _) = decoder.dimensions();
    let image = Image::try_from(decoder)?;

    // Scale so the logo is LOGO_SIZE points wide.
    let dpi = (width_px.max(1) as f32) * 72.0 / LOGO_SIZE;
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm::from(Pt(50.0))),
            translate_y: Some(Mm::from(Pt(700.0))),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
    Ok(())
}

fn draw_layout(layer: &PdfLayerReference, fonts: &Fonts, layout: &PaystubLayout) {
    layer.set_outline_color(Color::Rgb(Rgb::new(0.5, 0.5, 0.5, None)));
    layer.set_outline_thickness(0.5);

    // Header
    text(layer, &layout.title, 16.0, 180.0, 720.0, &fonts.bold);
    text(layer, &layout.period_line, 10.0, 180.0, 700.0, &fonts.regular);

    // Employee information
    text(layer, &layout.employee_heading, 12.0, 50.0, 660.0, &fonts.bold);
    let mut y = 640.0;
    for (label, value) in &layout.employee_rows {
        text(layer, label, 10.0, 50.0, y, &fonts.bold);
        text(layer, value, 10.0, 200.0, y, &fonts.regular);
        y -= 18.0;
    }

    // Earnings and deductions, side by side
    draw_table(layer, fonts, &layout.earnings, 50.0, 540.0);
    draw_table(layer, fonts, &layout.deductions, 310.0, 540.0);

    // Net payment summary
    text(layer, &layout.summary_title, 12.0, 50.0, 400.0, &fonts.bold);
    text(layer, &layout.net_payment_line, 10.0, 50.0, 380.0, &fonts.regular);

    // Footer
    text(layer, &layout.footer, 8.0, 50.0, 30.0, &fonts.oblique);
}

fn draw_table(layer: &PdfLayerReference, fonts: &Fonts, table: &AmountTable, x: f32, top: f32) {
    const WIDTH: f32 = 250.0;
    const ROW: f32 = 18.0;

    text(layer, &table.heading, 10.0, x + 4.0, top, &fonts.bold);
    text(layer, &table.amount_heading, 10.0, x + WIDTH - 60.0, top, &fonts.bold);
    rule(layer, x, x + WIDTH, top - 6.0);

    let mut y = top - ROW;
    for (label, amount) in &table.rows {
        text(layer, label, 10.0, x + 4.0, y, &fonts.regular);
        text(layer, amount, 10.0, x + WIDTH - 60.0, y, &fonts.regular);
        rule(layer, x, x + WIDTH, y - 6.0);
        y -= ROW;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::fs;
    use std::str::FromStr;

    fn record(full_name: &str) -> PayrollRecord {
        let d = |s: &str| Decimal::from_str(s).unwrap();
        PayrollRecord {
            full_name: full_name.to_string(),
            email: "john@example.com".to_string(),
            position: "Developer".to_string(),
            health_discount_amount: d("50.0"),
            social_discount_amount: d("100.0"),
            taxes_discount_amount: d("75.0"),
            other_discount_amount: d("25.0"),
            gross_salary: d("3000.0"),
            gross_payment: d("2800.0"),
            net_payment: d("2600.0"),
            period: "2023-12-15".to_string(),
        }
    }

    #[test]
    fn test_render_without_logo_dir() {
        let renderer = PaystubRenderer::new("/no/such/logo/dir");
        let paystub = renderer
            .render(&record("John Doe"), "atdev", Locale::Spanish)
            .unwrap();

        assert!(paystub.bytes.starts_with(b"%PDF"));
        assert!(!paystub.logo_drawn);
        assert_eq!(paystub.file_name, "paystub_John Doe_2023-12-15.pdf");
        assert_eq!(paystub.locale, Locale::Spanish);
        assert_eq!(paystub.company, "atdev");
    }

    #[test]
    fn test_unreadable_logo_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.png"), b"definitely not a png").unwrap();

        let renderer = PaystubRenderer::new(dir.path());
        let paystub = renderer
            .render(&record("John Doe"), "unknown-company", Locale::English)
            .unwrap();

        assert!(paystub.bytes.starts_with(b"%PDF"));
        assert!(!paystub.logo_drawn);
    }

    #[test]
    fn test_company_logo_is_drawn() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::from_pixel(8, 8, image::Rgb([200, 30, 30]))
            .save(dir.path().join("acme.png"))
            .unwrap();

        let renderer = PaystubRenderer::new(dir.path());
        let paystub = renderer
            .render(&record("John Doe"), "acme", Locale::English)
            .unwrap();

        assert!(paystub.logo_drawn);
        assert!(paystub.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_unknown_company_falls_back_to_default_logo() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::from_pixel(8, 8, image::Rgb([20, 60, 200]))
            .save(dir.path().join("default.png"))
            .unwrap();

        let renderer = PaystubRenderer::new(dir.path());
        let paystub = renderer
            .render(&record("John Doe"), "no-such-company", Locale::English)
            .unwrap();

        assert!(paystub.logo_drawn);
        assert_eq!(paystub.company, "no-such-company");
        assert!(paystub.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_file_name_strips_path_separators() {
        let name = paystub_file_name(&record("../../etc/John"));
        assert!(!name.contains('/'));
        assert!(name.starts_with("paystub_"));
        assert!(name.ends_with("_2023-12-15.pdf"));
    }
}
