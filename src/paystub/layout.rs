//! Paystub content, independent of drawing.
//!
//! [`PaystubLayout`] holds every piece of text that goes on the page, grouped
//! into sections in their fixed top-to-bottom order: header, employee
//! information, earnings and deductions side by side, net payment summary,
//! generation footer.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::PayrollRecord;

use super::labels::PaystubLabels;

/// A two-column table with a heading row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountTable {
    /// Left heading (a section title).
    pub heading: String,
    /// Right heading.
    pub amount_heading: String,
    /// Label/amount pairs.
    pub rows: Vec<(String, String)>,
}

/// All text printed on one paystub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaystubLayout {
    /// Document title.
    pub title: String,
    /// `"{period label}: {period}"`.
    pub period_line: String,
    /// Employee information section title.
    pub employee_heading: String,
    /// Name, position and email rows.
    pub employee_rows: Vec<(String, String)>,
    /// Left-hand table.
    pub earnings: AmountTable,
    /// Right-hand table.
    pub deductions: AmountTable,
    /// Summary section title.
    pub summary_title: String,
    /// Net payment line.
    pub net_payment_line: String,
    /// Generation timestamp line.
    pub footer: String,
}

impl PaystubLayout {
    /// Lays out one record with the given labels.
    pub fn build(
        record: &PayrollRecord,
        labels: &PaystubLabels,
        generated_at: NaiveDateTime,
    ) -> Self {
        PaystubLayout {
            title: labels.title.to_string(),
            period_line: format!("{}: {}", labels.period, record.period),
            employee_heading: labels.employee.to_string(),
            employee_rows: vec![
                ("Name/Nombre".to_string(), record.full_name.clone()),
                ("Position/Posición".to_string(), record.position.clone()),
                ("Email".to_string(), record.email.clone()),
            ],
            earnings: AmountTable {
                heading: labels.earnings.to_string(),
                amount_heading: "Amount".to_string(),
                rows: vec![
                    ("Gross Salary".to_string(), money(record.gross_salary)),
                    ("Gross Payment".to_string(), money(record.gross_payment)),
                ],
            },
            deductions: AmountTable {
                heading: labels.deductions.to_string(),
                amount_heading: "Amount".to_string(),
                rows: vec![
                    ("Health".to_string(), deduction(record.health_discount_amount)),
                    ("Social Security".to_string(), deduction(record.social_discount_amount)),
                    ("Taxes".to_string(), deduction(record.taxes_discount_amount)),
                    ("Other".to_string(), deduction(record.other_discount_amount)),
                ],
            },
            summary_title: labels.summary.to_string(),
            net_payment_line: format!("Net Payment: {}", money(record.net_payment)),
            footer: format!("Generated on {}", generated_at.format("%Y-%m-%d %H:%M")),
        }
    }
}

/// `$1234.50`
pub fn money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// `-$50.00`
pub fn deduction(amount: Decimal) -> String {
    format!("-${:.2}", amount.round_dp(2))
}
