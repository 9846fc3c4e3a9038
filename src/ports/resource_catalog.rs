//! Resource catalog port.

use crate::domain::access::GatedResource;
use crate::domain::registration::Offering;

/// Port for looking up which resources an offering unlocks.
///
/// Catalog data is static configuration, so this port is synchronous.
pub trait ResourceCatalog: Send + Sync {
    /// The gated resources unlocked by a purchase of `offering`.
    fn resources_for(&self, offering: Offering) -> Vec<GatedResource>;

    /// Link to the next offering tier, if there is one to upsell.
    fn upsell_link(&self, offering: Offering) -> Option<String>;
}
