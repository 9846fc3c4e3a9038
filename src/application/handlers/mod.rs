//! Use-case handlers, one per operation.

pub mod dashboard;
pub mod leads;
pub mod payment;
pub mod registration;

pub use dashboard::{DashboardResources, GetResourcesError, GetResourcesHandler, GetResourcesQuery};
pub use leads::{
    LeadError, RequestBrochureCommand, RequestBrochureHandler, SubmitContactCommand,
    SubmitContactHandler,
};
pub use payment::{
    ConfirmPaymentHandler, ConfirmPaymentQuery, MeetingUrls, PaymentOutcome,
    ProcessPaymentCommand, ProcessPaymentHandler,
};
pub use registration::{
    EnrollCohortCommand, EnrollCohortHandler, RegisterWorkshopCommand, RegisterWorkshopHandler,
    RegistrationError,
};
