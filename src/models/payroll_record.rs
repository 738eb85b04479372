//! The payroll record model.
//!
//! A [`PayrollRecord`] is one employee's pay data for one period, built from
//! a single CSV row by [`crate::validation::validate_row`]. It is never
//! mutated or persisted.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A raw CSV row: column name to cell value, in header order.
///
/// Empty cells are `None`, never the text `"None"`.
pub type RawRow = IndexMap<String, Option<String>>;

/// One employee's pay data for one period.
///
/// No relationship between `net_payment` and the other amounts is checked;
/// the input arithmetic is trusted.
///
/// # Example
///
/// ```
/// use paystub_mailer::models::PayrollRecord;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = PayrollRecord {
///     full_name: "John Doe".to_string(),
///     email: "john@example.com".to_string(),
///     position: "Developer".to_string(),
///     health_discount_amount: Decimal::from_str("50.0").unwrap(),
///     social_discount_amount: Decimal::from_str("100.0").unwrap(),
///     taxes_discount_amount: Decimal::from_str("75.0").unwrap(),
///     other_discount_amount: Decimal::from_str("25.0").unwrap(),
///     gross_salary: Decimal::from_str("3000.0").unwrap(),
///     gross_payment: Decimal::from_str("2800.0").unwrap(),
///     net_payment: Decimal::from_str("2600.0").unwrap(),
///     period: "2023-12-15".to_string(),
/// };
/// assert_eq!(record.net_payment, Decimal::from_str("2600").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Employee's full name.
    pub full_name: String,
    /// Syntactically valid mailbox address.
    pub email: String,
    /// Job position or title.
    pub position: String,
    /// Health insurance deduction.
    pub health_discount_amount: Decimal,
    /// Social security deduction.
    pub social_discount_amount: Decimal,
    /// Income tax deduction.
    pub taxes_discount_amount: Decimal,
    /// Any other deduction.
    pub other_discount_amount: Decimal,
    /// Salary before deductions.
    pub gross_salary: Decimal,
    /// Payment before deductions.
    pub gross_payment: Decimal,
    /// Amount actually paid.
    pub net_payment: Decimal,
    /// Pay period in `YYYY-MM-DD` form. Kept as text; not calendar-checked.
    pub period: String,
}
