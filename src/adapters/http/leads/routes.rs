//! HTTP routes for lead-form endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{request_brochure, submit_contact, LeadsAppState};

/// Creates the lead-form router.
pub fn leads_routes(state: LeadsAppState) -> Router {
    Router::new()
        // POST /api/forms/contact
        .route("/api/forms/contact", post(submit_contact))
        // POST /api/forms/brochure
        .route("/api/forms/brochure", post(request_brochure))
        .with_state(state)
}
