//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Mount the development-only dummy-pay routes. Never valid in
    /// production; config validation enforces that.
    #[serde(default)]
    pub enable_dummy_pay: bool,

    /// Run deliverability checks on lead-form emails
    #[serde(default)]
    pub enable_deliverability_check: bool,
}
