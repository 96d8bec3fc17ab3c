//! Core library for hotel booking confirmation e-mails.
//!
//! This crate provides:
//! - Platform detection from keyword priorities (Weekendesk, Expedia, HRS, Booking.com, ...)
//! - Per-platform field extraction (prices, commission, stay, guest, card)
//! - French price normalization
//! - PMS summaries: platform scripts and generic layouts

pub mod error;
pub mod extraction;
pub mod models;
pub mod platform;
pub mod render;

pub use error::{OtamailError, Result};
pub use extraction::{parser_for, EmailParser, ExtractionResult, ReservationExtractor};
pub use models::config::OtamailConfig;
pub use models::reservation::Reservation;
pub use platform::{detect_platform, list_platforms, Platform};
pub use render::{list_templates, RenderContext, SummaryRenderer, Template};

/// Parse an e-mail, detecting the platform when none is given.
///
/// Input beyond the default length cap is ignored.
pub fn parse(text: &str, platform: Option<Platform>) -> Reservation {
    ReservationExtractor::new()
        .with_platform(platform)
        .extract(text)
        .reservation
}

/// Like [`parse`] with a platform id; unknown ids use the direct parser.
pub fn parse_with_id(text: &str, platform_id: Option<&str>) -> Reservation {
    parse(text, platform_id.map(Platform::resolve))
}

/// Render a record for an operator, stamped with today's date.
///
/// Without a template the platform script is used.
pub fn render(record: &Reservation, operator: &str, template: Option<Template>) -> String {
    SummaryRenderer::new()
        .with_template(template.unwrap_or_default())
        .render(record, operator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detects() {
        assert_eq!(parse("Airbnb", None).platform, Platform::Airbnb);
        assert_eq!(parse("Airbnb", Some(Platform::Hrs)).platform, Platform::Hrs);
    }

    #[test]
    fn test_parse_applies_length_cap() {
        let max = models::config::ExtractionConfig::default().max_input_chars;
        let text = format!("{}Airbnb", " ".repeat(max));
        assert_eq!(parse(&text, None).platform, Platform::Direct);
        assert_eq!(detect_platform(&text), Platform::Airbnb);
    }

    #[test]
    fn test_parse_with_id() {
        assert_eq!(parse_with_id("Airbnb", Some("booking")).platform, Platform::Booking);
        assert_eq!(parse_with_id("Airbnb", Some("trivago")).platform, Platform::Direct);
        assert_eq!(parse_with_id("Airbnb", None).platform, Platform::Airbnb);
    }

    #[test]
    fn test_render_defaults_to_script() {
        let out = render(&Reservation::new(Platform::Airbnb), "Julie", None);
        assert!(out.starts_with("Airbnb\n"));
        assert!(out.contains("Julie + "));
        assert!(out.ends_with("encaisser uniquement TDS + extras"));
    }
}
