//! Record validation.
//!
//! Turns a [`RawRow`] into a [`PayrollRecord`], or reports every offending
//! field at once. Validation has no side effects.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use validator::ValidateEmail;

use crate::models::{PayrollRecord, RawRow};

/// A single field-level problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Column name.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

/// Why a row could not become a [`PayrollRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// One-based data row number.
    pub row: usize,
    /// Every offending field, in column order.
    pub fields: Vec<FieldError>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} validation error{} for row {}: ",
            self.fields.len(),
            if self.fields.len() == 1 { "" } else { "s" },
            self.row
        )?;
        for (i, error) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// Validates one CSV row.
///
/// Missing columns and empty cells are both reported as `field required`.
/// Amounts must parse as decimals; the four discounts must also be
/// non-negative. The email must satisfy mailbox syntax; deliverability is
/// not checked.
///
/// # Example
///
/// ```
/// use paystub_mailer::models::RawRow;
/// use paystub_mailer::validation::validate_row;
///
/// let mut raw = RawRow::new();
/// raw.insert("full_name".to_string(), Some("John Doe".to_string()));
/// raw.insert("email".to_string(), Some("not-an-email".to_string()));
///
/// let failure = validate_row(1, &raw).unwrap_err();
/// assert!(failure.fields.iter().any(|e| e.field == "email"));
/// assert!(failure.fields.iter().any(|e| e.field == "period"));
/// ```
pub fn validate_row(row: usize, raw: &RawRow) -> Result<PayrollRecord, ValidationFailure> {
    let mut reader = FieldReader {
        raw,
        errors: Vec::new(),
    };

    let record = PayrollRecord {
        full_name: reader.text("full_name"),
        email: reader.email("email"),
        position: reader.text("position"),
        health_discount_amount: reader.discount("health_discount_amount"),
        social_discount_amount: reader.discount("social_discount_amount"),
        taxes_discount_amount: reader.discount("taxes_discount_amount"),
        other_discount_amount: reader.discount("other_discount_amount"),
        gross_salary: reader.amount("gross_salary"),
        gross_payment: reader.amount("gross_payment"),
        net_payment: reader.amount("net_payment"),
        period: reader.text("period"),
    };

    if reader.errors.is_empty() {
        Ok(record)
    } else {
        Err(ValidationFailure {
            row,
            fields: reader.errors,
        })
    }
}

/// Reads typed values out of a raw row, collecting errors as it goes.
/// Failed reads yield a placeholder that is discarded with the record.
struct FieldReader<'a> {
    raw: &'a RawRow,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    fn required(&mut self, field: &str) -> Option<&'a str> {
        let raw = self.raw;
        let value = raw
            .get(field)
            .and_then(|v| v.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if value.is_none() {
            self.fail(field, "field required");
        }
        value
    }

    fn text(&mut self, field: &str) -> String {
        self.required(field).map(str::to_string).unwrap_or_default()
    }

    fn email(&mut self, field: &str) -> String {
        let Some(value) = self.required(field).map(str::to_string) else {
            return String::new();
        };
        if !value.validate_email() {
            self.fail(field, "value is not a valid email address");
        }
        value
    }

    fn amount(&mut self, field: &str) -> Decimal {
        let Some(value) = self.required(field).map(str::to_string) else {
            return Decimal::ZERO;
        };
        match parse_decimal(&value) {
            Some(amount) => amount,
            None => {
                self.fail(field, format!("'{}' is not a valid number", value));
                Decimal::ZERO
            }
        }
    }

    fn discount(&mut self, field: &str) -> Decimal {
        let before = self.errors.len();
        let amount = self.amount(field);
        if self.errors.len() == before && amount.is_sign_negative() && !amount.is_zero() {
            self.fail(field, "must be greater than or equal to 0");
        }
        amount
    }
}

/// Accepts plain and scientific notation (`2.8e3`).
fn parse_decimal(value: &str) -> Option<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_row() -> RawRow {
        [
            ("full_name", "John Doe"),
            ("email", "john@example.com"),
            ("position", "Developer"),
            ("health_discount_amount", "50.0"),
            ("social_discount_amount", "100.0"),
            ("taxes_discount_amount", "75.0"),
            ("other_discount_amount", "25.0"),
            ("gross_salary", "3000.0"),
            ("gross_payment", "2800.0"),
            ("net_payment", "2600.0"),
            ("period", "2023-12-15"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Some(v.to_string())))
        .collect()
    }

    fn decimal(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_valid_row_builds_record() {
        let record = validate_row(1, &valid_row()).unwrap();
        assert_eq!(record.full_name, "John Doe");
        assert_eq!(record.email, "john@example.com");
        assert_eq!(record.health_discount_amount, decimal("50.0"));
        assert_eq!(record.net_payment, decimal("2600.0"));
        assert_eq!(record.period, "2023-12-15");
    }

    #[test]
    fn test_empty_cell_is_missing_not_text() {
        let mut raw = valid_row();
        raw.insert("position".to_string(), None);

        let failure = validate_row(3, &raw).unwrap_err();
        assert_eq!(failure.row, 3);
        assert_eq!(
            failure.fields,
            vec![FieldError {
                field: "position".to_string(),
                message: "field required".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_column_is_reported() {
        let mut raw = valid_row();
        raw.shift_remove("period");

        let failure = validate_row(1, &raw).unwrap_err();
        assert_eq!(failure.fields[0].field, "period");
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let mut raw = valid_row();
        raw.insert("email".to_string(), Some("john.example.com".to_string()));

        let failure = validate_row(2, &raw).unwrap_err();
        assert_eq!(failure.fields[0].field, "email");
        assert_eq!(
            failure.to_string(),
            "1 validation error for row 2: email: value is not a valid email address"
        );
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        let mut raw = valid_row();
        raw.insert("gross_salary".to_string(), Some("three thousand".to_string()));

        let failure = validate_row(1, &raw).unwrap_err();
        assert_eq!(failure.fields[0].field, "gross_salary");
        assert!(failure.fields[0].message.contains("three thousand"));
    }

    #[test]
    fn test_negative_discount_is_rejected() {
        let mut raw = valid_row();
        raw.insert("taxes_discount_amount".to_string(), Some("-1".to_string()));

        let failure = validate_row(1, &raw).unwrap_err();
        assert_eq!(failure.fields[0].field, "taxes_discount_amount");
    }

    #[test]
    fn test_negative_net_payment_is_trusted() {
        let mut raw = valid_row();
        raw.insert("net_payment".to_string(), Some("-10.00".to_string()));

        let record = validate_row(1, &raw).unwrap();
        assert_eq!(record.net_payment, decimal("-10.00"));
    }

    #[test]
    fn test_scientific_notation_amount() {
        let mut raw = valid_row();
        raw.insert("gross_payment".to_string(), Some("2.8e3".to_string()));

        let record = validate_row(1, &raw).unwrap();
        assert_eq!(record.gross_payment, decimal("2800"));
    }

    #[test]
    fn test_period_is_not_calendar_checked() {
        let mut raw = valid_row();
        raw.insert("period".to_string(), Some("2023-02-30".to_string()));

        let record = validate_row(1, &raw).unwrap();
        assert_eq!(record.period, "2023-02-30");
    }

    #[test]
    fn test_every_problem_is_collected() {
        let mut raw = valid_row();
        raw.insert("full_name".to_string(), None);
        raw.insert("email".to_string(), Some("nope".to_string()));
        raw.insert("net_payment".to_string(), Some("abc".to_string()));

        let failure = validate_row(7, &raw).unwrap_err();
        let fields: Vec<&str> = failure.fields.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["full_name", "email", "net_payment"]);
        assert!(failure.to_string().starts_with("3 validation errors for row 7"));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let mut raw = valid_row();
        raw.insert("department".to_string(), Some("Engineering".to_string()));
        assert!(validate_row(1, &raw).is_ok());
    }

    proptest! {
        #[test]
        fn prop_non_negative_discounts_are_accepted(cents in 0u64..10_000_000u64) {
            let mut raw = valid_row();
            let amount = Decimal::new(cents as i64, 2);
            raw.insert("other_discount_amount".to_string(), Some(amount.to_string()));
            let record = validate_row(1, &raw).unwrap();
            prop_assert_eq!(record.other_discount_amount, amount);
        }

        #[test]
        fn prop_negative_discounts_are_rejected(cents in 1u64..10_000_000u64) {
            let mut raw = valid_row();
            let amount = -Decimal::new(cents as i64, 2);
            raw.insert("health_discount_amount".to_string(), Some(amount.to_string()));
            let failure = validate_row(1, &raw).unwrap_err();
            prop_assert_eq!(failure.fields[0].field.as_str(), "health_discount_amount");
        }
    }
}
