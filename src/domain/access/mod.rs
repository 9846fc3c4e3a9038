//! Access - gated resources and the credentials that unlock them.

mod errors;
mod resource;
mod session;

pub use errors::AccessDenied;
pub use resource::{GatedResource, ResourceKind};
pub use session::AccessCredentials;
