//! Integration tests for the lead-to-access pipeline.
//!
//! Wires the real routers and handlers over in-memory adapters and
//! drives them with HTTP requests: registration -> payment -> gated
//! dashboard resources, plus the confirmation redirect.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use chipwise_academy::adapters::catalog::StaticResourceCatalog;
use chipwise_academy::adapters::gateway::DummyGateway;
use chipwise_academy::adapters::http::dashboard::{dashboard_routes, DashboardAppState};
use chipwise_academy::adapters::http::payment::{payment_routes, PaymentAppState};
use chipwise_academy::adapters::records::InMemoryPaymentRecords;
use chipwise_academy::application::handlers::{
    ConfirmPaymentHandler, EnrollCohortHandler, GetResourcesHandler, MeetingUrls,
    ProcessPaymentHandler, RegisterWorkshopHandler,
};
use chipwise_academy::domain::foundation::EmailAddress;
use chipwise_academy::domain::leads::FormRow;
use chipwise_academy::domain::payment::ConfirmSigner;
use chipwise_academy::ports::{
    DispatchError, EmailDispatcher, FormSink, PaymentRecordStore, SinkError, TemplatedEmail,
};

const SIGNING_SECRET: &str = "integration-test-signing-secret";

// =============================================================================
// Test Infrastructure
// =============================================================================

#[derive(Default)]
struct RecordingSink {
    rows: Mutex<Vec<FormRow>>,
}

#[async_trait]
impl FormSink for RecordingSink {
    async fn append(&self, row: &FormRow) -> Result<(), SinkError> {
        self.rows.lock().unwrap().push(row.clone());
        Ok(())
    }
}

struct NullMailer;

#[async_trait]
impl EmailDispatcher for NullMailer {
    async fn send(&self, _email: &TemplatedEmail) -> Result<(), DispatchError> {
        Ok(())
    }
}

struct TestApp {
    router: Router,
    records: Arc<InMemoryPaymentRecords>,
    sink: Arc<RecordingSink>,
}

fn test_app(dummy_pay_enabled: bool) -> TestApp {
    let records = Arc::new(InMemoryPaymentRecords::new());
    let sink = Arc::new(RecordingSink::default());
    let mailer = Arc::new(NullMailer);

    let payments = Arc::new(ProcessPaymentHandler::new(
        Arc::new(DummyGateway::new()),
        records.clone(),
        MeetingUrls {
            workshop: Some("https://meet.chipwiseacademy.com/workshop".into()),
            cohort: None,
        },
    ));

    let payment_state = PaymentAppState {
        register_workshop: Arc::new(RegisterWorkshopHandler::new(
            payments.clone(),
            sink.clone(),
            mailer.clone(),
        )),
        enroll_cohort: Arc::new(EnrollCohortHandler::new(
            payments,
            sink.clone(),
            mailer,
        )),
        confirm: Arc::new(ConfirmPaymentHandler::new(
            records.clone(),
            Arc::new(ConfirmSigner::new(SIGNING_SECRET)),
        )),
        dummy_pay_enabled,
    };

    let dashboard_state = DashboardAppState {
        get_resources: Arc::new(GetResourcesHandler::new(
            records.clone(),
            Arc::new(StaticResourceCatalog::new()),
        )),
    };

    TestApp {
        router: payment_routes(payment_state).merge(dashboard_routes(dashboard_state)),
        records,
        sink,
    }
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn workshop_body() -> Value {
    json!({
        "name": "Asha Rao",
        "email": "asha@example.com",
        "phone": "9876543210",
        "domainInterest": "Verification",
        "whatsappOptIn": true
    })
}

// =============================================================================
// Round Trip
// =============================================================================

#[tokio::test]
async fn workshop_registration_unlocks_dashboard_resources() {
    let app = test_app(true);

    let (status, body) =
        post_json(&app.router, "/api/payment/workshop/dummy-pay", workshop_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let token = body["accessToken"].as_str().expect("token present");
    assert!(token.len() >= 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(
        body["meetingUrl"],
        "https://meet.chipwiseacademy.com/workshop"
    );

    // Same credentials unlock the dashboard: header carrier first.
    let request = Request::builder()
        .uri("/api/dashboard/resources")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header("x-access-email", "asha@example.com")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    let resources = body["resources"].as_array().unwrap();
    assert!(!resources.is_empty());
    assert!(resources.iter().all(|r| r["title"].is_string()
        && r["url"].is_string()
        && r["type"].is_string()));
    assert!(body["upsellLink"].is_string());

    // Legacy query-parameter shim still works.
    let uri = format!(
        "/api/dashboard/resources?email=asha@example.com&token={}",
        token
    );
    let (status, _) = get(&app.router, &uri).await;
    assert_eq!(status, StatusCode::OK);

    // The lead row landed in the sheet sink.
    assert_eq!(app.sink.rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn cohort_enrollment_succeeds_without_phone() {
    let app = test_app(true);

    let (status, body) = post_json(
        &app.router,
        "/api/payment/cohort/dummy-pay",
        json!({"name": "Ravi", "email": "ravi@example.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    // No cohort meeting link is configured: present but null.
    assert!(body["meetingUrl"].is_null());
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn invalid_email_fails_validation_with_no_payment_record() {
    let app = test_app(true);

    let mut body = workshop_body();
    body["email"] = json!("not-an-email");
    let (status, response) =
        post_json(&app.router, "/api/payment/workshop/dummy-pay", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], "VALIDATION_FAILED");
    assert_eq!(response["error"]["fields"][0]["field"], "email");

    // No record was created for any email.
    let stored = app
        .records
        .find_by_email(&EmailAddress::parse("asha@example.com").unwrap())
        .await
        .unwrap();
    assert!(stored.is_empty());
    assert!(app.sink.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_domain_interest_is_rejected_with_allowed_values() {
    let app = test_app(true);

    let mut body = workshop_body();
    body["domainInterest"] = json!("Astrology");
    let (status, response) =
        post_json(&app.router, "/api/payment/workshop/dummy-pay", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = response["error"]["fields"][0]["message"].as_str().unwrap();
    assert!(message.contains("Verification"));
}

// =============================================================================
// Dummy-Pay Gating
// =============================================================================

#[tokio::test]
async fn dummy_pay_routes_vanish_when_disabled() {
    let app = test_app(false);

    let (status, _) =
        post_json(&app.router, "/api/payment/workshop/dummy-pay", workshop_body()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Confirmation Redirect
// =============================================================================

#[tokio::test]
async fn confirm_accepts_only_the_signed_transaction() {
    let app = test_app(true);

    let (_, body) =
        post_json(&app.router, "/api/payment/workshop/dummy-pay", workshop_body()).await;
    let order_id = body["orderId"].as_str().unwrap().to_string();
    let token = body["accessToken"].as_str().unwrap().to_string();

    let signer = ConfirmSigner::new(SIGNING_SECRET);
    let sig = signer.sign(&order_id.parse().unwrap());

    // Valid signature: same success payload, same token, repeatable.
    for _ in 0..2 {
        let uri = format!(
            "/api/payment/workshop/confirm?txn={}&email=asha@example.com&sig={}",
            order_id, sig
        );
        let (status, confirm_body) = get(&app.router, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(confirm_body["success"], true);
        assert_eq!(confirm_body["accessToken"], token.as_str());
    }

    // Tampered signature is rejected.
    let uri = format!(
        "/api/payment/workshop/confirm?txn={}&email=asha@example.com&sig={}",
        order_id,
        "0".repeat(64)
    );
    let (status, confirm_body) = get(&app.router, &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(confirm_body["error"]["code"], "INVALID_SIGNATURE");

    // Signature valid but email not bound to the record: not found.
    let uri = format!(
        "/api/payment/workshop/confirm?txn={}&email=other@example.com&sig={}",
        order_id, sig
    );
    let (status, _) = get(&app.router, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Enumeration Proofing
// =============================================================================

#[tokio::test]
async fn wrong_token_and_unknown_email_produce_identical_denials() {
    let app = test_app(true);

    let (_, body) =
        post_json(&app.router, "/api/payment/workshop/dummy-pay", workshop_body()).await;
    assert_eq!(body["success"], true);

    // Registered email with a wrong token.
    let wrong_token = get(
        &app.router,
        &format!(
            "/api/dashboard/resources?email=asha@example.com&token={}",
            "f".repeat(64)
        ),
    )
    .await;

    // Email nobody ever registered.
    let unknown_email = get(
        &app.router,
        &format!(
            "/api/dashboard/resources?email=ghost@example.com&token={}",
            "f".repeat(64)
        ),
    )
    .await;

    // Missing credentials entirely.
    let missing = get(&app.router, "/api/dashboard/resources").await;

    assert_eq!(wrong_token.0, StatusCode::UNAUTHORIZED);
    // Byte-identical bodies: no cause is distinguishable.
    assert_eq!(wrong_token.1, unknown_email.1);
    assert_eq!(wrong_token.1, missing.1);
}
