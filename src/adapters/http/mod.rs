//! HTTP adapters - axum routes, handlers, and DTOs per resource.

pub mod dashboard;
pub mod leads;
pub mod payment;
