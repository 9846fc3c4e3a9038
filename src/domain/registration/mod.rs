//! Registration - offerings and validated registration requests.

mod offering;
mod request;

pub use offering::{DomainTrack, Offering};
pub use request::{CohortEnrollment, WorkshopRegistration};
