//! ChipWise Academy backend entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use chipwise_academy::adapters::catalog::StaticResourceCatalog;
use chipwise_academy::adapters::email::{HttpEmailVerifier, TemplateEmailDispatcher};
use chipwise_academy::adapters::gateway::DummyGateway;
use chipwise_academy::adapters::http::dashboard::{dashboard_routes, DashboardAppState};
use chipwise_academy::adapters::http::leads::{leads_routes, LeadsAppState};
use chipwise_academy::adapters::http::payment::{payment_routes, PaymentAppState};
use chipwise_academy::adapters::postgres::PgPaymentRecordStore;
use chipwise_academy::adapters::sheets::WebhookFormSink;
use chipwise_academy::application::handlers::{
    ConfirmPaymentHandler, EnrollCohortHandler, GetResourcesHandler, MeetingUrls,
    ProcessPaymentHandler, RegisterWorkshopHandler, RequestBrochureHandler, SubmitContactHandler,
};
use chipwise_academy::config::AppConfig;
use chipwise_academy::domain::payment::ConfirmSigner;
use chipwise_academy::ports::EmailVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.server.log_level)?)
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!().run(&pool).await?;

    let app = build_router(&config, pool);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, environment = ?config.server.environment, "starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Wires adapters into handlers and handlers into routes.
fn build_router(config: &AppConfig, pool: sqlx::PgPool) -> Router {
    let request_timeout = Duration::from_secs(config.server.request_timeout_secs);
    let gateway_timeout = Duration::from_secs(config.payment.gateway_timeout_secs);

    let records = Arc::new(PgPaymentRecordStore::new(pool));
    let catalog = Arc::new(StaticResourceCatalog::new());
    let sink = Arc::new(WebhookFormSink::new(
        config.forms.sheet_webhook_url.clone(),
        gateway_timeout,
    ));
    let mailer = Arc::new(TemplateEmailDispatcher::new(
        config.email.dispatch_endpoint.clone(),
        config.email.api_key.expose_secret().clone(),
        config.email.from_header(),
        gateway_timeout,
    ));
    let verifier: Option<Arc<dyn EmailVerifier>> = config
        .email
        .deliverability_endpoint
        .as_ref()
        .filter(|_| config.features.enable_deliverability_check)
        .map(|endpoint| {
            Arc::new(HttpEmailVerifier::new(endpoint.clone(), gateway_timeout))
                as Arc<dyn EmailVerifier>
        });

    let payments = Arc::new(ProcessPaymentHandler::new(
        Arc::new(DummyGateway::new()),
        records.clone(),
        MeetingUrls {
            workshop: config.payment.workshop_meeting_url.clone(),
            cohort: config.payment.cohort_meeting_url.clone(),
        },
    ));
    let signer = Arc::new(ConfirmSigner::new(
        config.payment.confirm_signing_secret.expose_secret().clone(),
    ));

    let payment_state = PaymentAppState {
        register_workshop: Arc::new(RegisterWorkshopHandler::new(
            payments.clone(),
            sink.clone(),
            mailer.clone(),
        )),
        enroll_cohort: Arc::new(EnrollCohortHandler::new(
            payments.clone(),
            sink.clone(),
            mailer.clone(),
        )),
        confirm: Arc::new(ConfirmPaymentHandler::new(records.clone(), signer)),
        // Config validation already rejects this flag in production.
        dummy_pay_enabled: config.features.enable_dummy_pay,
    };

    let dashboard_state = DashboardAppState {
        get_resources: Arc::new(GetResourcesHandler::new(records, catalog)),
    };

    let leads_state = LeadsAppState {
        submit_contact: Arc::new(SubmitContactHandler::new(
            sink.clone(),
            mailer.clone(),
            verifier.clone(),
        )),
        request_brochure: Arc::new(RequestBrochureHandler::new(
            sink,
            mailer,
            verifier,
            config.forms.brochure_url.clone(),
        )),
    };

    payment_routes(payment_state)
        .merge(dashboard_routes(dashboard_state))
        .merge(leads_routes(leads_state))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer(config))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_headers(Any)
    } else {
        CorsLayer::new().allow_origin(origins).allow_headers(Any)
    }
}
