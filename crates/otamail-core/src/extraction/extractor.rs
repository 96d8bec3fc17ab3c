//! Detection plus parsing, with input bounding and extraction warnings.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::models::config::ExtractionConfig;
use crate::models::reservation::Reservation;
use crate::platform::{detect_platform, Platform};

use super::parsers::parser_for;

/// Result of reservation extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted reservation.
    pub reservation: Reservation,
    /// Platform was detected from the text rather than forced.
    pub detected: bool,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Configurable front-end to the platform parsers.
#[derive(Debug, Clone)]
pub struct ReservationExtractor {
    /// Longer input is cut before matching.
    max_input_chars: usize,
    /// Skip detection and use this parser.
    platform: Option<Platform>,
}

impl ReservationExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an extractor from the extraction section of the configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            max_input_chars: config.max_input_chars,
            platform: config.forced_platform(),
        }
    }

    /// Set the input length cap, in characters.
    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }

    /// Force a platform; `None` restores detection.
    pub fn with_platform(mut self, platform: Option<Platform>) -> Self {
        self.platform = platform;
        self
    }

    /// Parse one e-mail. Never fails: missing fields become warnings.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let text = match truncate_chars(text, self.max_input_chars) {
            Some(cut) => {
                warn!(
                    "Input longer than {} characters, truncating",
                    self.max_input_chars
                );
                warnings.push(format!(
                    "Input truncated to {} characters",
                    self.max_input_chars
                ));
                cut
            }
            None => text,
        };

        info!("Parsing e-mail from {} characters of text", text.chars().count());

        let (platform, detected) = match self.platform {
            Some(platform) => (platform, false),
            None => (detect_platform(text), true),
        };

        let reservation = parser_for(platform).parse(text);

        for field in reservation.missing_fields() {
            warnings.push(format!("Could not extract {}", field));
        }

        debug!(
            "Extracted {} reservation {} with {} warnings",
            platform,
            reservation.reservation_id.as_deref().unwrap_or("-"),
            warnings.len()
        );

        ExtractionResult {
            reservation,
            detected,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for ReservationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// First `max` characters of `text`, or `None` when it is short enough.
fn truncate_chars(text: &str, max: usize) -> Option<&str> {
    text.char_indices().nth(max).map(|(end, _)| &text[..end])
}
