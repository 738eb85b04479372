//! Localized paystub email text.

use crate::paystub::Locale;

/// Subject and plain-text body of a paystub email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Builds the paystub email for `employee_name` in `locale`.
///
/// ```
/// use paystub_mailer::notify::paystub_email;
/// use paystub_mailer::paystub::Locale;
///
/// let email = paystub_email("John Doe", Locale::English);
/// assert_eq!(email.subject, "Your Paystub is Ready");
/// assert!(email.body.starts_with("Dear John Doe,"));
/// ```
pub fn paystub_email(employee_name: &str, locale: Locale) -> EmailTemplate {
    match locale {
        Locale::English => EmailTemplate {
            subject: "Your Paystub is Ready".to_string(),
            body: format!(
                "Dear {},\n\n\
                 Your paystub for this period is attached.\n\
                 Please contact HR if you have any questions.\n\n\
                 Best regards,\nPayroll Team",
                employee_name
            ),
        },
        Locale::Spanish => EmailTemplate {
            subject: "Su Comprobante de Pago Está Listo".to_string(),
            body: format!(
                "Estimado/a {},\n\n\
                 Adjunto encontrará su comprobante de pago de este período.\n\
                 Por favor contacte a RRHH si tiene alguna pregunta.\n\n\
                 Saludos cordiales,\nDepartamento de Nómina",
                employee_name
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_template() {
        let email = paystub_email("Jane Roe", Locale::English);
        assert_eq!(
            email.body,
            "Dear Jane Roe,\n\nYour paystub for this period is attached.\nPlease contact HR if you have any questions.\n\nBest regards,\nPayroll Team"
        );
    }

    #[test]
    fn test_spanish_template() {
        let email = paystub_email("Juan Pérez", Locale::Spanish);
        assert_eq!(email.subject, "Su Comprobante de Pago Está Listo");
        assert!(email.body.starts_with("Estimado/a Juan Pérez,\n\n"));
        assert!(email.body.ends_with("Saludos cordiales,\nDepartamento de Nómina"));
    }

    #[test]
    fn test_unknown_country_falls_back_to_english() {
        let email = paystub_email("Jane Roe", Locale::from_country_code("fr"));
        assert_eq!(email.subject, "Your Paystub is Ready");
    }
}
