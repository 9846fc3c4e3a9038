//! Leads - the site's non-payment capture forms and their sink rows.

mod form;

pub use form::{BrochureRequest, ContactMessage, FormKind, FormRow};
