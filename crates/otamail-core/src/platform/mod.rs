//! Supported booking platforms and their static registry.

mod detector;

pub use detector::detect_platform;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OtamailError;

/// A booking channel the engine knows how to parse and render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Weekendesk,
    Expedia,
    Hrs,
    Booking,
    Originals,
    Airbnb,
    /// Direct booking or unclassified e-mail, no intermediary.
    Direct,
}

/// Static description of a platform used for detection and listings.
#[derive(Debug, Clone, Copy)]
pub struct PlatformDescriptor {
    /// Platform this entry describes.
    pub platform: Platform,
    /// Stable identifier.
    pub id: &'static str,
    /// Human readable name, also the first line of rendered summaries.
    pub name: &'static str,
    /// Lower-case substrings that identify the platform.
    pub keywords: &'static [&'static str],
    /// Lower value wins when several platforms match.
    pub priority: u8,
}

/// Platform registry in declaration order.
///
/// Declaration order breaks ties between equal priorities.
pub static REGISTRY: [PlatformDescriptor; 7] = [
    PlatformDescriptor {
        platform: Platform::Weekendesk,
        id: "weekendesk",
        name: "Weekendesk",
        keywords: &["weekendesk", "week-end"],
        priority: 1,
    },
    PlatformDescriptor {
        platform: Platform::Expedia,
        id: "expedia",
        name: "Expedia",
        keywords: &["expedia", "expediapartnercentral", "egencia", "expedia virtual card"],
        priority: 2,
    },
    PlatformDescriptor {
        platform: Platform::Hrs,
        id: "hrs",
        name: "HRS",
        keywords: &["hrs.com", "hrs group", "hotel reservation service"],
        priority: 3,
    },
    PlatformDescriptor {
        platform: Platform::Booking,
        id: "booking",
        name: "Booking.com",
        keywords: &["booking.com", "booking", "réservation booking"],
        priority: 4,
    },
    PlatformDescriptor {
        platform: Platform::Originals,
        id: "originals",
        name: "The Originals",
        keywords: &["the originals", "originals relais", "club (en €)", "demi-pension"],
        priority: 5,
    },
    PlatformDescriptor {
        platform: Platform::Airbnb,
        id: "airbnb",
        name: "Airbnb",
        keywords: &["airbnb", "air bnb"],
        priority: 6,
    },
    PlatformDescriptor {
        platform: Platform::Direct,
        id: "direct",
        name: "Réservation directe",
        keywords: &[],
        priority: u8::MAX,
    },
];

impl Platform {
    /// Registry entry for this platform.
    pub fn descriptor(self) -> &'static PlatformDescriptor {
        REGISTRY
            .iter()
            .find(|d| d.platform == self)
            // Every variant has exactly one entry; the last one is Direct.
            .unwrap_or(&REGISTRY[REGISTRY.len() - 1])
    }

    /// Stable identifier.
    pub fn id(self) -> &'static str {
        self.descriptor().id
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Strict lookup by identifier (case-insensitive).
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        REGISTRY
            .iter()
            .find(|d| d.id.eq_ignore_ascii_case(id))
            .map(|d| d.platform)
    }

    /// Lenient lookup: unknown identifiers fall back to [`Platform::Direct`].
    pub fn resolve(id: &str) -> Self {
        match Self::from_id(id) {
            Some(platform) => platform,
            None => {
                debug!("Unknown platform id '{}', using direct booking", id);
                Platform::Direct
            }
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = OtamailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| OtamailError::UnknownPlatform(s.to_string()))
    }
}

/// Supported platforms as `(id, display name)`, in registry order.
pub fn list_platforms() -> Vec<(&'static str, &'static str)> {
    REGISTRY.iter().map(|d| (d.id, d.name)).collect()
}
