//! Localized section titles.

use serde::{Deserialize, Serialize};

/// Language used for a paystub and its email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// English, the fallback for every unknown country code.
    English,
    /// Dominican Spanish, selected by country code `do`.
    Spanish,
}

impl Locale {
    /// Picks the locale for a two-letter country code.
    ///
    /// Only `do` (any case) selects Spanish.
    ///
    /// ```
    /// use paystub_mailer::paystub::Locale;
    ///
    /// assert_eq!(Locale::from_country_code("do"), Locale::Spanish);
    /// assert_eq!(Locale::from_country_code("us"), Locale::English);
    /// assert_eq!(Locale::from_country_code(""), Locale::English);
    /// ```
    pub fn from_country_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("do") {
            Locale::Spanish
        } else {
            Locale::English
        }
    }

    /// The section titles for this locale.
    pub fn labels(self) -> &'static PaystubLabels {
        match self {
            Locale::English => &ENGLISH,
            Locale::Spanish => &SPANISH,
        }
    }
}

/// The six section titles printed on a paystub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaystubLabels {
    /// Document title.
    pub title: &'static str,
    /// Employee information block.
    pub employee: &'static str,
    /// Earnings column heading.
    pub earnings: &'static str,
    /// Deductions column heading.
    pub deductions: &'static str,
    /// Net payment summary heading.
    pub summary: &'static str,
    /// Pay period prefix.
    pub period: &'static str,
}

static ENGLISH: PaystubLabels = PaystubLabels {
    title: "PAYSTUB",
    employee: "Employee Information",
    earnings: "Earnings",
    deductions: "Deductions",
    summary: "Payment Summary",
    period: "Pay Period",
};

static SPANISH: PaystubLabels = PaystubLabels {
    title: "COMPROBANTE DE PAGO",
    employee: "Información del Empleado",
    earnings: "Ingresos",
    deductions: "Deducciones",
    summary: "Resumen de Pago",
    period: "Período de Pago",
};
