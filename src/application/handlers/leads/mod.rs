//! Lead-form handlers (contact, brochure).

mod request_brochure;
mod submit_contact;

pub use request_brochure::{RequestBrochureCommand, RequestBrochureHandler};
pub use submit_contact::{LeadError, SubmitContactCommand, SubmitContactHandler};
