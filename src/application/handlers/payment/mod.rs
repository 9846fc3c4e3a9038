//! Payment processor and confirmation handlers.

mod confirm_payment;
mod process_payment;

pub use confirm_payment::{ConfirmPaymentHandler, ConfirmPaymentQuery};
pub use process_payment::{
    outcome_from_record, MeetingUrls, PaymentOutcome, ProcessPaymentCommand, ProcessPaymentHandler,
};
