//! Dashboard query handlers.

mod get_resources;

pub use get_resources::{
    DashboardResources, GetResourcesError, GetResourcesHandler, GetResourcesQuery,
};
