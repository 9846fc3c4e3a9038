//! Payment HTTP endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CohortEnrollmentRequest, PaymentResponse, WorkshopRegistrationRequest};
pub use handlers::PaymentAppState;
pub use routes::payment_routes;
