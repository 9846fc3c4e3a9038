//! Purchasable offerings and workshop interest tracks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A purchasable unit. Determines which resource set a grant unlocks,
/// which meeting link is disclosed, and the upsell target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Offering {
    /// One-day live workshop session.
    Workshop,

    /// Cohort preview enrollment.
    Cohort,
}

impl Offering {
    /// Stable wire/storage name, also the `{purpose}` path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Offering::Workshop => "workshop",
            Offering::Cohort => "cohort",
        }
    }

    /// Charge amount in INR for this offering.
    pub fn price_inr(&self) -> u32 {
        match self {
            Offering::Workshop => 299,
            Offering::Cohort => 1999,
        }
    }
}

impl fmt::Display for Offering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Offering {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "workshop" => Ok(Offering::Workshop),
            "cohort" => Ok(Offering::Cohort),
            _ => Err(ValidationError::not_one_of("purpose", &["workshop", "cohort"])),
        }
    }
}

/// Workshop interest category. Closed set; free-form input is parsed
/// case-insensitively against the display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainTrack {
    RtlDesign,
    Verification,
    PhysicalDesign,
    Dft,
    AnalogLayout,
}

impl DomainTrack {
    /// Display names accepted from the registration form.
    pub const ALLOWED: [&'static str; 5] = [
        "RTL Design",
        "Verification",
        "Physical Design",
        "DFT",
        "Analog Layout",
    ];

    /// Human-readable name, as shown on the site.
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainTrack::RtlDesign => "RTL Design",
            DomainTrack::Verification => "Verification",
            DomainTrack::PhysicalDesign => "Physical Design",
            DomainTrack::Dft => "DFT",
            DomainTrack::AnalogLayout => "Analog Layout",
        }
    }

    /// Parses a form value into a track.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NotOneOf` on `domainInterest` listing the
    /// accepted values.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_lowercase().as_str() {
            "rtl design" => Ok(DomainTrack::RtlDesign),
            "verification" => Ok(DomainTrack::Verification),
            "physical design" => Ok(DomainTrack::PhysicalDesign),
            "dft" => Ok(DomainTrack::Dft),
            "analog layout" => Ok(DomainTrack::AnalogLayout),
            _ => Err(ValidationError::not_one_of("domainInterest", &Self::ALLOWED)),
        }
    }
}

impl fmt::Display for DomainTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
