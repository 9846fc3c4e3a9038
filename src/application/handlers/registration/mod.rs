//! Registration intake handlers.

mod enroll_cohort;
mod register_workshop;

pub use enroll_cohort::{EnrollCohortCommand, EnrollCohortHandler};
pub use register_workshop::{RegisterWorkshopCommand, RegisterWorkshopHandler, RegistrationError};
