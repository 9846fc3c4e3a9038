//! GetResourcesHandler - the resource gate.
//!
//! Decides whether a presented `(email, token)` pair unlocks the gated
//! resource list. Every failure cause - unknown email, wrong token,
//! expired grant - collapses into the one `AccessDenied` value; callers
//! cannot tell them apart.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::access::{AccessCredentials, AccessDenied, GatedResource};
use crate::domain::foundation::Timestamp;
use crate::ports::{PaymentRecordStore, ResourceCatalog};

/// Query to fetch gated resources for a credential pair.
#[derive(Debug, Clone)]
pub struct GetResourcesQuery {
    pub credentials: AccessCredentials,
}

/// The unlocked resource list.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardResources {
    /// Resources, each with its own expiry when narrower than the grant's.
    pub resources: Vec<GatedResource>,

    /// Link to the next offering tier, if any.
    pub upsell_link: Option<String>,
}

/// Gate failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GetResourcesError {
    /// Uniform denial; the cause is deliberately not represented.
    #[error(transparent)]
    Denied(#[from] AccessDenied),

    /// Persistence failure; not an access decision.
    #[error("resource lookup failed: {0}")]
    Infrastructure(String),
}

/// Handler for the resource gate.
pub struct GetResourcesHandler {
    records: Arc<dyn PaymentRecordStore>,
    catalog: Arc<dyn ResourceCatalog>,
}

impl GetResourcesHandler {
    pub fn new(records: Arc<dyn PaymentRecordStore>, catalog: Arc<dyn ResourceCatalog>) -> Self {
        Self { records, catalog }
    }

    /// Evaluates the gate at the current instant.
    pub async fn handle(
        &self,
        query: GetResourcesQuery,
    ) -> Result<DashboardResources, GetResourcesError> {
        self.handle_at(query, Timestamp::now()).await
    }

    /// Evaluates the gate at an explicit instant.
    ///
    /// Expiry is a pure function of `now` against the stored expiry; no
    /// timer ever fires.
    pub async fn handle_at(
        &self,
        query: GetResourcesQuery,
        now: Timestamp,
    ) -> Result<DashboardResources, GetResourcesError> {
        let records = self
            .records
            .find_by_email(&query.credentials.email)
            .await
            .map_err(|e| GetResourcesError::Infrastructure(e.to_string()))?;

        // One uniform denial for no-records, wrong-token, and expired.
        let grant = records
            .iter()
            .find(|record| record.grants_access(&query.credentials.token, now))
            .ok_or(AccessDenied)?;

        let grant_expiry = grant
            .expires_at
            .expect("active record carries an expiry");

        let resources = self
            .catalog
            .resources_for(grant.offering)
            .into_iter()
            .filter(|resource| !resource.is_expired(now))
            .map(|resource| {
                let narrowed = resource.expiry_within(grant_expiry);
                GatedResource {
                    expires_at: narrowed,
                    ..resource
                }
            })
            .collect();

        Ok(DashboardResources {
            resources,
            upsell_link: self.catalog.upsell_link(grant.offering),
        })
    }
}
