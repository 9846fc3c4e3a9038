//! HTTP DTOs for dashboard endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::DashboardResources;
use crate::domain::access::GatedResource;

// ════════════════════════════════════════════════════════════════════════════════
// Request
// ════════════════════════════════════════════════════════════════════════════════

/// Legacy query-parameter credentials. Migration shim only; the
/// Authorization header is the primary carrier.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceQueryParams {
    pub email: Option<String>,
    pub token: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response
// ════════════════════════════════════════════════════════════════════════════════

/// `{ resources: [{title, url, type, expiresAt?}], upsellLink? }`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResourcesResponse {
    pub resources: Vec<ResourceView>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub upsell_link: Option<String>,
}

/// One gated resource on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceView {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,

    /// Present only when narrower than the grant's expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl From<GatedResource> for ResourceView {
    fn from(resource: GatedResource) -> Self {
        Self {
            title: resource.title,
            url: resource.url,
            kind: resource.kind.as_str().to_string(),
            expires_at: resource.expires_at.map(|ts| ts.to_rfc3339()),
        }
    }
}

impl From<DashboardResources> for DashboardResourcesResponse {
    fn from(resources: DashboardResources) -> Self {
        Self {
            resources: resources.resources.into_iter().map(Into::into).collect(),
            upsell_link: resources.upsell_link,
        }
    }
}

/// Error body. Denials always serialize to the identical shape.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    /// The one denial body: identical bytes whether the email is unknown,
    /// the token is wrong, or the grant expired.
    pub fn access_denied() -> Self {
        Self {
            error: ErrorBody {
                code: "ACCESS_DENIED".to_string(),
                message: "Access denied. Please register again to restore access.".to_string(),
            },
        }
    }

    pub fn internal() -> Self {
        Self {
            error: ErrorBody {
                code: "INTERNAL_ERROR".to_string(),
                message: "Something went wrong. Please try again.".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::ResourceKind;
    use crate::domain::foundation::Timestamp;

    #[test]
    fn resource_view_renames_kind_to_type() {
        let view = ResourceView::from(GatedResource::new(
            "Slides",
            "https://cdn.example.com/s.pdf",
            ResourceKind::Slide,
        ));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["type"], "slide");
        assert!(json.get("expiresAt").is_none());
    }

    #[test]
    fn resource_expiry_serializes_as_rfc3339() {
        let view = ResourceView::from(
            GatedResource::new("Replay", "https://x", ResourceKind::Recording)
                .expiring_at(Timestamp::now()),
        );

        let json = serde_json::to_value(&view).unwrap();
        assert!(json["expiresAt"].is_string());
    }

    #[test]
    fn denial_body_is_stable() {
        let a = serde_json::to_string(&ErrorResponse::access_denied()).unwrap();
        let b = serde_json::to_string(&ErrorResponse::access_denied()).unwrap();
        assert_eq!(a, b);
    }
}
