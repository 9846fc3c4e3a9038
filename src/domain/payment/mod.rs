//! Payment - records, access tokens, and confirmation signatures.

mod confirm_signature;
mod errors;
mod record;
mod token;

pub use confirm_signature::ConfirmSigner;
pub use errors::ConfirmError;
pub use record::{PaymentRecord, PaymentStatus, ACCESS_GRANT_HOURS};
pub use token::AccessToken;
