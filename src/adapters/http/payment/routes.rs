//! HTTP routes for payment endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{confirm_payment, dummy_pay_cohort, dummy_pay_workshop, PaymentAppState};

/// Creates the payment router.
///
/// The confirmation endpoint is always mounted; the dummy-pay routes are
/// a development bypass and exist only when the feature flag says so, so
/// a production deployment answers 404 for them.
pub fn payment_routes(state: PaymentAppState) -> Router {
    let mut router = Router::new()
        // GET /api/payment/:purpose/confirm
        .route("/api/payment/:purpose/confirm", get(confirm_payment));

    if state.dummy_pay_enabled {
        router = router
            // POST /api/payment/workshop/dummy-pay
            .route("/api/payment/workshop/dummy-pay", post(dummy_pay_workshop))
            // POST /api/payment/cohort/dummy-pay
            .route("/api/payment/cohort/dummy-pay", post(dummy_pay_cohort));
    }

    router.with_state(state)
}
