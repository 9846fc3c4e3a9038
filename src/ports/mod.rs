//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentGateway` - charges the payment backend
//! - `PaymentRecordStore` - atomic persistence for payment records
//! - `ResourceCatalog` - gated resource sets per offering
//! - `FormSink` - spreadsheet-append collaborator for lead rows
//! - `EmailDispatcher` - hosted template dispatch service
//! - `EmailVerifier` - deliverability heuristic service

mod email_dispatch;
mod email_verifier;
mod form_sink;
mod payment_gateway;
mod payment_records;
mod resource_catalog;

pub use email_dispatch::{DispatchError, EmailDispatcher, EmailTemplate, TemplatedEmail};
pub use email_verifier::{Deliverability, EmailVerifier, VerifierError};
pub use form_sink::{FormSink, SinkError};
pub use payment_gateway::{
    ChargeRequest, GatewayCharge, GatewayError, GatewayErrorCode, PaymentGateway,
};
pub use payment_records::{CompletedPayment, InsertOutcome, PaymentRecordStore};
pub use resource_catalog::ResourceCatalog;
