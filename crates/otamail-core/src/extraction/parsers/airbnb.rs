//! Airbnb reservation e-mails.
//!
//! Airbnb collects the stay itself. The payout is what reaches the property;
//! when it is missing, the host service fee stands in for the commission.

use lazy_static::lazy_static;

use crate::extraction::rules::patterns::nights_in;
use crate::extraction::rules::FieldRules;
use crate::models::reservation::{commission_from, Reservation};
use crate::platform::Platform;

use super::EmailParser;

lazy_static! {
    static ref TARIF: FieldRules = FieldRules::new(&[
        r"(?:Total|Montant\s+total)\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"(?:Prix\s+par\s+nuit|Nightly\s+rate)\s*[:\-]?\s*([\d\s,\.]+)",
    ]);

    static ref PAYOUT: FieldRules = FieldRules::new(&[
        r"(?:Versement|Payout|Vous\s+recevrez)\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"(?:Host\s+)?(?:Payout|Earnings)\s*[:\-]?\s*([\d\s,\.]+)",
    ]);

    static ref SERVICE_FEE: FieldRules = FieldRules::new(&[
        r"(?:Frais\s+de\s+service|Service\s+fee|Airbnb\s+fee)\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
    ]);

    static ref LISTING: FieldRules = FieldRules::new(&[
        r"(?:Logement|Listing|Property)\s*[:\-]?\s*([^\n]+)",
    ]);

    static ref ARRIVAL: FieldRules = FieldRules::new(&[
        r"(?:Arriv[eé]e|Check[\-\s]?in)\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
        r"(\d{1,2}\s+(?:jan|f[eé]v|mar|avr|mai|juin|juil|ao[uû]|sep|oct|nov|d[eé]c)[a-z]*(?:\s+\d{2,4})?)\s*[\-–]",
    ]);

    static ref DEPARTURE: FieldRules = FieldRules::new(&[
        r"(?:D[eé]part|Check[\-\s]?out)\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
        r"[\-–]\s*(\d{1,2}\s+(?:jan|f[eé]v|mar|avr|mai|juin|juil|ao[uû]|sep|oct|nov|d[eé]c)[a-z]*(?:\s+\d{2,4})?)",
    ]);

    static ref GUEST: FieldRules = FieldRules::new(&[
        r"(?:Voyageur|Guest|Hôte)\s*[:\-]?\s*([A-ZÀ-Ü][a-zà-ü]+(?:\s+[A-ZÀ-Ü]\.?)?)",
    ]);

    static ref REFERENCE: FieldRules = FieldRules::new(&[
        r"(?:Code\s+de\s+confirmation|Confirmation\s+code)\s*[:\-]?\s*([A-Z0-9]+)",
        r"(?:R[eé]servation)\s*[:\-]?\s*([A-Z0-9]+)",
    ]);
}

/// Parser for Airbnb e-mails.
pub struct AirbnbParser;

impl EmailParser for AirbnbParser {
    fn platform(&self) -> Platform {
        Platform::Airbnb
    }

    fn parse(&self, text: &str) -> Reservation {
        let mut record = Reservation::new(Platform::Airbnb);

        record.tarif = TARIF.first_price(text);
        record.vad = PAYOUT.first_price(text);

        if record.vad.is_some() {
            record.commission = commission_from(record.tarif, record.vad);
        } else if let (Some(tarif), Some(fee)) = (record.tarif, SERVICE_FEE.first_price(text)) {
            record.commission = Some(fee);
            record.vad = Some((tarif - fee).round_dp(2));
        }

        record.nights = nights_in(text);
        record.stay_details = record.nights.map(|n| format!("{} nuit(s)", n));
        record.room_type = LISTING.first_text(text);

        record.arrival = ARRIVAL.first_text(text);
        record.departure = DEPARTURE.first_text(text);

        record.guest_name = GUEST.first_text(text);
        record.reservation_id = REFERENCE.first_text(text);

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Option<Decimal> {
        Decimal::from_str(s).ok()
    }

    const EMAIL: &str = "Airbnb - Réservation confirmée
Code de confirmation : HMX4K2P9QZ
Voyageur : Lucas M.
Arrivée : 05/08/2025
Départ : 09/08/2025
4 nuits
Logement : Studio vue mer
Total : 480,00 €
Versement : 415,20 €
";

    #[test]
    fn test_commission_from_payout() {
        let record = AirbnbParser.parse(EMAIL);

        assert_eq!(record.tarif, dec("480.00"));
        assert_eq!(record.vad, dec("415.20"));
        assert_eq!(record.commission, dec("64.80"));
    }

    #[test]
    fn test_service_fee_fallback() {
        let record = AirbnbParser.parse("Airbnb\nTotal : 300,00 €\nFrais de service : 45,00 €\n");

        assert_eq!(record.commission, dec("45.00"));
        assert_eq!(record.vad, dec("255.00"));
    }

    #[test]
    fn test_fee_without_total() {
        let record = AirbnbParser.parse("Airbnb\nFrais de service : 45,00 €\n");
        assert_eq!(record.tarif, None);
        assert_eq!(record.vad, None);
        assert_eq!(record.commission, None);
    }

    #[test]
    fn test_stay_fields() {
        let record = AirbnbParser.parse(EMAIL);

        assert_eq!(record.reservation_id.as_deref(), Some("HMX4K2P9QZ"));
        assert_eq!(record.guest_name.as_deref(), Some("Lucas M."));
        assert_eq!(record.arrival.as_deref(), Some("05/08/2025"));
        assert_eq!(record.departure.as_deref(), Some("09/08/2025"));
        assert_eq!(record.nights, Some(4));
        assert_eq!(record.stay_details.as_deref(), Some("4 nuit(s)"));
        assert_eq!(record.room_type.as_deref(), Some("Studio vue mer"));
    }

    #[test]
    fn test_month_name_range() {
        let record = AirbnbParser.parse("Airbnb\n12 août – 15 août 2025\n");

        assert_eq!(record.arrival.as_deref(), Some("12 août"));
        assert_eq!(record.departure.as_deref(), Some("15 août 2025"));
    }
}
