//! Lead-capture forms and the flat rows appended to the spreadsheet sink.

use crate::domain::foundation::{EmailAddress, Timestamp, ValidationError};
use crate::domain::registration::{CohortEnrollment, WorkshopRegistration};

/// Which form produced a row; keys the sheet the row lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Brochure,
    Workshop,
    Cohort,
}

impl FormKind {
    /// Stable sink key.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Brochure => "brochure",
            FormKind::Workshop => "workshop",
            FormKind::Cohort => "cohort",
        }
    }
}

/// Contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: EmailAddress,
    pub phone: String,
    pub message: String,
}

impl ContactMessage {
    /// Validates raw form input.
    ///
    /// # Errors
    ///
    /// Returns every validation failure at once, each naming the
    /// offending field.
    pub fn new(
        name: &str,
        email: &str,
        phone: &str,
        message: &str,
    ) -> Result<Self, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let name = non_empty("name", name, &mut errors);
        let email = match EmailAddress::parse(email) {
            Ok(e) => Some(e),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        let phone = non_empty("phone", phone, &mut errors);
        let message = non_empty("message", message, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            name: name.unwrap(),
            email: email.unwrap(),
            phone: phone.unwrap(),
            message: message.unwrap(),
        })
    }
}

/// Brochure download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrochureRequest {
    pub name: String,
    pub email: EmailAddress,
    pub phone: String,
}

impl BrochureRequest {
    /// Validates raw form input.
    ///
    /// # Errors
    ///
    /// Returns every validation failure at once, each naming the
    /// offending field.
    pub fn new(name: &str, email: &str, phone: &str) -> Result<Self, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let name = non_empty("name", name, &mut errors);
        let email = match EmailAddress::parse(email) {
            Ok(e) => Some(e),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        let phone = non_empty("phone", phone, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            name: name.unwrap(),
            email: email.unwrap(),
            phone: phone.unwrap(),
        })
    }
}

/// Flat ordered row appended to the spreadsheet sink, keyed by form type.
#[derive(Debug, Clone, PartialEq)]
pub struct FormRow {
    pub kind: FormKind,
    pub submitted_at: Timestamp,
    pub fields: Vec<(String, String)>,
}

impl FormRow {
    pub fn contact(msg: &ContactMessage, submitted_at: Timestamp) -> Self {
        Self {
            kind: FormKind::Contact,
            submitted_at,
            fields: vec![
                ("name".into(), msg.name.clone()),
                ("email".into(), msg.email.to_string()),
                ("phone".into(), msg.phone.clone()),
                ("message".into(), msg.message.clone()),
            ],
        }
    }

    pub fn brochure(req: &BrochureRequest, submitted_at: Timestamp) -> Self {
        Self {
            kind: FormKind::Brochure,
            submitted_at,
            fields: vec![
                ("name".into(), req.name.clone()),
                ("email".into(), req.email.to_string()),
                ("phone".into(), req.phone.clone()),
            ],
        }
    }

    pub fn workshop(reg: &WorkshopRegistration, submitted_at: Timestamp) -> Self {
        Self {
            kind: FormKind::Workshop,
            submitted_at,
            fields: vec![
                ("name".into(), reg.name.clone()),
                ("email".into(), reg.email.to_string()),
                ("phone".into(), reg.phone.clone()),
                ("domain_interest".into(), reg.domain_track.as_str().into()),
                ("whatsapp_opt_in".into(), reg.whatsapp_opt_in.to_string()),
            ],
        }
    }

    pub fn cohort(enr: &CohortEnrollment, submitted_at: Timestamp) -> Self {
        Self {
            kind: FormKind::Cohort,
            submitted_at,
            fields: vec![
                ("name".into(), enr.name.clone()),
                ("email".into(), enr.email.to_string()),
                ("phone".into(), enr.phone.clone().unwrap_or_default()),
            ],
        }
    }
}

fn non_empty(field: &str, value: &str, errors: &mut Vec<ValidationError>) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(ValidationError::empty_field(field));
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_message_collects_all_errors() {
        let errors = ContactMessage::new("", "bad", "", "").unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["name", "email", "phone", "message"]);
    }

    #[test]
    fn contact_row_preserves_field_order() {
        let msg = ContactMessage::new("Asha", "a@x.com", "9876543210", "Fees?").unwrap();
        let row = FormRow::contact(&msg, Timestamp::now());

        assert_eq!(row.kind, FormKind::Contact);
        let keys: Vec<&str> = row.fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["name", "email", "phone", "message"]);
    }

    #[test]
    fn workshop_row_includes_consent_flag() {
        let reg = WorkshopRegistration::new("Asha", "a@x.com", "9876543210", "DFT", true).unwrap();
        let row = FormRow::workshop(&reg, Timestamp::now());

        assert!(row
            .fields
            .iter()
            .any(|(k, v)| k == "whatsapp_opt_in" && v == "true"));
    }

    #[test]
    fn brochure_request_requires_phone() {
        let errors = BrochureRequest::new("Asha", "a@x.com", " ").unwrap_err();
        assert_eq!(errors[0].field(), "phone");
    }
}
