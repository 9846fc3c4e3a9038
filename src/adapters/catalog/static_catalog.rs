//! Static resource catalog.
//!
//! The resource sets per offering are fixed site content; none of them
//! carry their own expiry here, so the grant expiry alone bounds them.
//! The narrowing logic in the gate still applies when a catalog entry
//! does set one.

use crate::domain::access::{GatedResource, ResourceKind};
use crate::domain::registration::Offering;
use crate::ports::ResourceCatalog;

const SITE_BASE: &str = "https://chipwiseacademy.com";
const CDN_BASE: &str = "https://cdn.chipwiseacademy.com";

/// Fixed per-offering resource sets.
#[derive(Debug, Default)]
pub struct StaticResourceCatalog;

impl StaticResourceCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceCatalog for StaticResourceCatalog {
    fn resources_for(&self, offering: Offering) -> Vec<GatedResource> {
        match offering {
            Offering::Workshop => vec![
                GatedResource::new(
                    "Workshop Session Recording",
                    format!("{}/gated/workshop-recording", CDN_BASE),
                    ResourceKind::Recording,
                ),
                GatedResource::new(
                    "RTL-to-GDSII Overview Slides",
                    format!("{}/gated/rtl-to-gdsii-slides.pdf", CDN_BASE),
                    ResourceKind::Slide,
                ),
                GatedResource::new(
                    "Static Timing Analysis Checklist",
                    format!("{}/gated/sta-checklist.pdf", CDN_BASE),
                    ResourceKind::Checklist,
                ),
                GatedResource::new(
                    "VLSI Interview Question Bank",
                    format!("{}/gated/interview-question-bank.pdf", CDN_BASE),
                    ResourceKind::Pdf,
                ),
            ],
            Offering::Cohort => vec![
                GatedResource::new(
                    "Cohort Preview: Verification Deep Dive",
                    format!("{}/gated/cohort-preview-recording", CDN_BASE),
                    ResourceKind::Recording,
                ),
                GatedResource::new(
                    "Full Cohort Syllabus",
                    format!("{}/gated/cohort-syllabus.pdf", CDN_BASE),
                    ResourceKind::Pdf,
                ),
                GatedResource::new(
                    "Private Community Invite",
                    format!("{}/community/join", SITE_BASE),
                    ResourceKind::Link,
                ),
                GatedResource::new(
                    "Toolchain Setup Guide",
                    format!("{}/gated/toolchain-setup.pdf", CDN_BASE),
                    ResourceKind::Checklist,
                ),
            ],
        }
    }

    fn upsell_link(&self, offering: Offering) -> Option<String> {
        match offering {
            // Workshop attendees get pointed at the full cohort.
            Offering::Workshop => Some(format!("{}/cohort", SITE_BASE)),
            Offering::Cohort => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_offerings_have_resources() {
        let catalog = StaticResourceCatalog::new();
        assert!(!catalog.resources_for(Offering::Workshop).is_empty());
        assert!(!catalog.resources_for(Offering::Cohort).is_empty());
    }

    #[test]
    fn workshop_upsells_cohort_and_cohort_is_top_tier() {
        let catalog = StaticResourceCatalog::new();
        assert_eq!(
            catalog.upsell_link(Offering::Workshop).as_deref(),
            Some("https://chipwiseacademy.com/cohort")
        );
        assert_eq!(catalog.upsell_link(Offering::Cohort), None);
    }

    #[test]
    fn resource_sets_differ_per_offering() {
        let catalog = StaticResourceCatalog::new();
        let workshop: Vec<String> = catalog
            .resources_for(Offering::Workshop)
            .into_iter()
            .map(|r| r.url)
            .collect();
        let cohort: Vec<String> = catalog
            .resources_for(Offering::Cohort)
            .into_iter()
            .map(|r| r.url)
            .collect();

        assert!(workshop.iter().all(|url| !cohort.contains(url)));
    }
}
