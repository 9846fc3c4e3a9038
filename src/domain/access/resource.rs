//! Gated resources.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Kind of gated asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Slide,
    Recording,
    Pdf,
    Checklist,
    Link,
}

impl ResourceKind {
    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Slide => "slide",
            ResourceKind::Recording => "recording",
            ResourceKind::Pdf => "pdf",
            ResourceKind::Checklist => "checklist",
            ResourceKind::Link => "link",
        }
    }
}

/// One gated asset made available to a token holder.
///
/// A resource may carry its own expiry narrower than the grant's; a
/// resource whose own expiry has passed is no longer grantable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatedResource {
    pub title: String,
    pub url: String,
    pub kind: ResourceKind,
    pub expires_at: Option<Timestamp>,
}

impl GatedResource {
    /// Creates a resource without its own expiry (grant expiry applies).
    pub fn new(title: impl Into<String>, url: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            kind,
            expires_at: None,
        }
    }

    /// Attaches a resource-specific expiry.
    pub fn expiring_at(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether this resource's own expiry has passed at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|expiry| !expiry.is_after(&now))
    }

    /// The resource's own expiry, if it is narrower than the grant's.
    pub fn expiry_within(&self, grant_expiry: Timestamp) -> Option<Timestamp> {
        self.expires_at.filter(|own| own.is_before(&grant_expiry))
    }
}
