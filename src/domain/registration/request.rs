//! Validated registration requests.
//!
//! Requests are constructed from raw form input at submission time and are
//! immutable afterwards. Construction is the validation boundary: a request
//! that fails here never reaches the payment processor, and no payment
//! record is created for it.

use crate::domain::foundation::{EmailAddress, ValidationError};

use super::{DomainTrack, Offering};

/// Minimum digits for a phone number to be considered plausible.
const MIN_PHONE_DIGITS: usize = 7;

/// Workshop registration: all contact fields required plus an interest
/// track; WhatsApp consent defaults to false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshopRegistration {
    pub name: String,
    pub email: EmailAddress,
    pub phone: String,
    pub domain_track: DomainTrack,
    pub whatsapp_opt_in: bool,
}

impl WorkshopRegistration {
    /// Validates raw form input into a registration.
    ///
    /// # Errors
    ///
    /// Returns every validation failure at once, each naming the offending
    /// field, so the form can surface all of them in one round trip.
    pub fn new(
        name: &str,
        email: &str,
        phone: &str,
        domain_interest: &str,
        whatsapp_opt_in: bool,
    ) -> Result<Self, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let name = collect(require_non_empty("name", name), &mut errors);
        let email = collect(EmailAddress::parse(email), &mut errors);
        let phone = collect(validate_phone("phone", phone), &mut errors);
        let domain_track = collect(DomainTrack::parse(domain_interest), &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name: name.unwrap(),
            email: email.unwrap(),
            phone: phone.unwrap(),
            domain_track: domain_track.unwrap(),
            whatsapp_opt_in,
        })
    }

    /// The offering this registration purchases.
    pub fn offering(&self) -> Offering {
        Offering::Workshop
    }
}

/// Cohort enrollment: name and email required, phone optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortEnrollment {
    pub name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
}

impl CohortEnrollment {
    /// Validates raw form input into an enrollment.
    ///
    /// # Errors
    ///
    /// Returns every validation failure at once, each naming the offending
    /// field.
    pub fn new(name: &str, email: &str, phone: Option<&str>) -> Result<Self, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let name = collect(require_non_empty("name", name), &mut errors);
        let email = collect(EmailAddress::parse(email), &mut errors);

        // Optional, but if provided it must be plausible.
        let phone = match phone.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) => collect(validate_phone("phone", p), &mut errors).map(Some),
            None => Some(None),
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name: name.unwrap(),
            email: email.unwrap(),
            phone: phone.unwrap(),
        })
    }

    /// The offering this enrollment purchases.
    pub fn offering(&self) -> Offering {
        Offering::Cohort
    }
}

fn collect<T>(result: Result<T, ValidationError>, errors: &mut Vec<ValidationError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

fn validate_phone(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let digits = trimmed.chars().filter(char::is_ascii_digit).count();
    if digits < MIN_PHONE_DIGITS {
        return Err(ValidationError::invalid_format(
            field,
            "too few digits for a phone number",
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workshop_registration_accepts_valid_input() {
        let reg = WorkshopRegistration::new(
            "Asha Rao",
            "asha@example.com",
            "+91 98765 43210",
            "Verification",
            true,
        )
        .unwrap();

        assert_eq!(reg.email.as_str(), "asha@example.com");
        assert_eq!(reg.domain_track, DomainTrack::Verification);
        assert!(reg.whatsapp_opt_in);
        assert_eq!(reg.offering(), Offering::Workshop);
    }

    #[test]
    fn workshop_registration_collects_all_field_errors() {
        let errors =
            WorkshopRegistration::new("", "not-an-email", "", "Astrology", false).unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["name", "email", "phone", "domainInterest"]);
    }

    #[test]
    fn workshop_registration_rejects_malformed_email_only() {
        let errors = WorkshopRegistration::new(
            "Asha",
            "not-an-email",
            "9876543210",
            "DFT",
            false,
        )
        .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "email");
    }

    #[test]
    fn cohort_enrollment_phone_is_optional() {
        let enr = CohortEnrollment::new("Ravi", "ravi@example.com", None).unwrap();
        assert_eq!(enr.phone, None);
        assert_eq!(enr.offering(), Offering::Cohort);

        let enr = CohortEnrollment::new("Ravi", "ravi@example.com", Some("")).unwrap();
        assert_eq!(enr.phone, None);
    }

    #[test]
    fn cohort_enrollment_validates_phone_when_present() {
        let errors = CohortEnrollment::new("Ravi", "ravi@example.com", Some("12ab")).unwrap_err();
        assert_eq!(errors[0].field(), "phone");
    }

    #[test]
    fn short_phone_is_rejected() {
        let errors =
            WorkshopRegistration::new("Asha", "a@x.com", "123", "Verification", false).unwrap_err();
        assert_eq!(errors[0].field(), "phone");
    }
}
