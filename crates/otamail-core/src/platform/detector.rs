//! Keyword-based platform detection.

use tracing::debug;

use super::{Platform, REGISTRY};

/// Classify a raw e-mail into exactly one platform.
///
/// A platform is a candidate as soon as one of its keywords occurs in the
/// lower-cased text. The candidate with the lowest priority wins, whatever the
/// number of keywords it matched; ties go to the earlier registry entry.
/// Without any candidate the e-mail is a direct booking.
pub fn detect_platform(text: &str) -> Platform {
    let lower = text.to_lowercase();

    let detected = REGISTRY
        .iter()
        .filter(|d| d.keywords.iter().any(|k| lower.contains(k)))
        .inspect(|d| debug!("Platform candidate: {} (priority {})", d.id, d.priority))
        // min_by_key keeps the first of equal minima
        .min_by_key(|d| d.priority)
        .map(|d| d.platform)
        .unwrap_or(Platform::Direct);

    debug!("Detected platform: {}", detected);
    detected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keyword() {
        assert_eq!(detect_platform("Nouvelle réservation Airbnb"), Platform::Airbnb);
        assert_eq!(detect_platform("Confirmation EXPEDIA"), Platform::Expedia);
        assert_eq!(detect_platform("Réservation via HRS.com"), Platform::Hrs);
    }

    #[test]
    fn test_priority_beats_order_of_appearance() {
        // Booking appears first but Weekendesk has the lower priority value.
        let text = "Booking ID: 123\nVotre week-end Weekendesk";
        assert_eq!(detect_platform(text), Platform::Weekendesk);

        let text = "Payée par Expedia\nbooking.com partner";
        assert_eq!(detect_platform(text), Platform::Expedia);
    }

    #[test]
    fn test_priority_beats_number_of_hits() {
        // Three Booking keywords against a single Originals keyword.
        let text = "booking.com - réservation booking - The Originals";
        assert_eq!(detect_platform(text), Platform::Booking);
    }

    #[test]
    fn test_hrs_wins_over_generic_booking_vocabulary() {
        let text = "HRS Group\nBooking number / Numéro de réservation: 998877";
        assert_eq!(detect_platform(text), Platform::Hrs);
    }

    #[test]
    fn test_no_keyword_is_direct() {
        assert_eq!(detect_platform("Bonjour, je souhaite une chambre."), Platform::Direct);
        assert_eq!(detect_platform(""), Platform::Direct);
    }
}
