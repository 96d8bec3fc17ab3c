//! One parser per booking platform.
//!
//! Parsers are independent of each other: each owns its pattern tables and
//! builds a [`Reservation`] from raw e-mail text without any shared state.

mod airbnb;
mod booking;
mod direct;
mod expedia;
mod hrs;
mod originals;
mod weekendesk;

pub use airbnb::AirbnbParser;
pub use booking::BookingParser;
pub use direct::DirectParser;
pub use expedia::ExpediaParser;
pub use hrs::HrsParser;
pub use originals::OriginalsParser;
pub use weekendesk::WeekendeskParser;

use crate::models::reservation::Reservation;
use crate::platform::Platform;

/// Turns the text of one e-mail into a reservation record.
pub trait EmailParser: Send + Sync {
    /// Platform this parser handles.
    fn platform(&self) -> Platform;

    /// Extract every field the platform's e-mails carry. Never fails.
    fn parse(&self, text: &str) -> Reservation;
}

/// Parser registered for a platform.
pub fn parser_for(platform: Platform) -> &'static dyn EmailParser {
    match platform {
        Platform::Weekendesk => &WeekendeskParser,
        Platform::Expedia => &ExpediaParser,
        Platform::Hrs => &HrsParser,
        Platform::Booking => &BookingParser,
        Platform::Originals => &OriginalsParser,
        Platform::Airbnb => &AirbnbParser,
        Platform::Direct => &DirectParser,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::REGISTRY;

    #[test]
    fn test_every_platform_has_its_parser() {
        for descriptor in &REGISTRY {
            let parser = parser_for(descriptor.platform);
            assert_eq!(parser.platform(), descriptor.platform);
            assert_eq!(parser.parse("").platform, descriptor.platform);
        }
    }
}
