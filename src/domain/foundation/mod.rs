//! Foundation - shared value objects and error types.

mod email_address;
mod errors;
mod ids;
mod timestamp;

pub use email_address::EmailAddress;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::TransactionId;
pub use timestamp::Timestamp;
