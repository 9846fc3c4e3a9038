//! Lead-form HTTP endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{BrochureFormRequest, ContactFormRequest};
pub use handlers::LeadsAppState;
pub use routes::leads_routes;
