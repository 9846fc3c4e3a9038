//! HTTP routes for dashboard endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{get_dashboard_resources, DashboardAppState};

/// Creates the dashboard router.
pub fn dashboard_routes(state: DashboardAppState) -> Router {
    Router::new()
        // GET /api/dashboard/resources
        .route("/api/dashboard/resources", get(get_dashboard_resources))
        .with_state(state)
}
