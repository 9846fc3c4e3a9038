//! Dashboard HTTP endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::DashboardResourcesResponse;
pub use handlers::DashboardAppState;
pub use routes::dashboard_routes;
