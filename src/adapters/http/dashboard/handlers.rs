//! HTTP handlers for dashboard endpoints.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{GetResourcesError, GetResourcesHandler, GetResourcesQuery};
use crate::domain::access::AccessCredentials;
use crate::domain::foundation::EmailAddress;

use super::dto::{DashboardResourcesResponse, ErrorResponse, ResourceQueryParams};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Dashboard API error that implements IntoResponse.
///
/// Every denial renders the identical 401 body; the cause never varies
/// the shape.
pub enum DashboardApiError {
    Denied,
    Internal(String),
}

impl IntoResponse for DashboardApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            DashboardApiError::Denied => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::access_denied()),
            )
                .into_response(),
            DashboardApiError::Internal(msg) => {
                tracing::error!(error = %msg, "dashboard endpoint failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::internal()),
                )
                    .into_response()
            }
        }
    }
}

impl From<GetResourcesError> for DashboardApiError {
    fn from(error: GetResourcesError) -> Self {
        match error {
            GetResourcesError::Denied(_) => DashboardApiError::Denied,
            GetResourcesError::Infrastructure(msg) => DashboardApiError::Internal(msg),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for dashboard endpoints.
#[derive(Clone)]
pub struct DashboardAppState {
    pub get_resources: Arc<GetResourcesHandler>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Credential Extraction
// ════════════════════════════════════════════════════════════════════════════════

/// Credentials presented by the browser.
///
/// Primary carrier: `Authorization: Bearer <token>` plus the
/// `x-access-email` header. The `?email&token` query parameters remain
/// as a migration shim for the old frontend and nothing else. Missing
/// or malformed credentials reject with the uniform denial.
#[derive(Debug, Clone)]
pub struct PresentedCredentials {
    pub email: String,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for PresentedCredentials
where
    S: Send + Sync,
{
    type Rejection = DashboardApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            // Header pair first.
            let bearer = parts
                .headers
                .get(axum::http::header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(str::to_string);
            let header_email = parts
                .headers
                .get("x-access-email")
                .and_then(|h| h.to_str().ok())
                .map(str::to_string);

            if let (Some(token), Some(email)) = (bearer, header_email) {
                return Ok(PresentedCredentials { email, token });
            }

            // Legacy query-parameter shim.
            let params = Query::<ResourceQueryParams>::try_from_uri(&parts.uri)
                .map(|q| q.0)
                .unwrap_or(ResourceQueryParams {
                    email: None,
                    token: None,
                });

            match (params.email, params.token) {
                (Some(email), Some(token)) => Ok(PresentedCredentials { email, token }),
                _ => Err(DashboardApiError::Denied),
            }
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/dashboard/resources
///
/// Returns the gated resource list for valid credentials, or the uniform
/// 401 denial.
pub async fn get_dashboard_resources(
    State(state): State<DashboardAppState>,
    credentials: PresentedCredentials,
) -> Result<Json<DashboardResourcesResponse>, DashboardApiError> {
    // An address that cannot parse has no records; same denial.
    let email = EmailAddress::parse(&credentials.email).map_err(|_| DashboardApiError::Denied)?;

    let resources = state
        .get_resources
        .handle(GetResourcesQuery {
            credentials: AccessCredentials::new(email, credentials.token),
        })
        .await?;

    Ok(Json(resources.into()))
}
