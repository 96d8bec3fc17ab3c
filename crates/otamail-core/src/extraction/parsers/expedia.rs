//! Expedia Partner Central e-mails.

use lazy_static::lazy_static;
use regex::Regex;

use crate::extraction::rules::patterns::CARDHOLDER;
use crate::extraction::rules::FieldRules;
use crate::models::reservation::Reservation;
use crate::platform::Platform;

use super::EmailParser;

lazy_static! {
    static ref TARIF: FieldRules = FieldRules::new(&[
        r"Prix\s+total\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"(\d+[\d\s,\.]*)\s*EUR\s*$",
    ]);

    static ref NIGHTS: FieldRules = FieldRules::new(&[
        r"Nombre\s+de\s+nuits\s*[:\-]?\s*(\d+)\s*nuit",
    ]);

    static ref ROOM: FieldRules = FieldRules::new(&[
        r"Type\s+de\s+chambre\s*[:\-]?\s*([^\n]+)",
    ]);

    static ref ARRIVAL: FieldRules = FieldRules::new(&[
        r"Date\s+d['’]arriv[eé]e\s*[:\-]?\s*([A-Za-z]+\s+\d{1,2},?\s+\d{4})",
        r"Date\s+d['’]arriv[eé]e\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
        r"Date\s+d['’]arriv[eé]e\s*[:\-]?\s*(\d{1,2}\s+\w+,?\s+\d{4})",
    ]);

    static ref DEPARTURE: FieldRules = FieldRules::new(&[
        r"Date\s+de\s+d[eé]part\s*[:\-]?\s*([A-Za-z]+\s+\d{1,2},?\s+\d{4})",
        r"Date\s+de\s+d[eé]part\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
        r"Date\s+de\s+d[eé]part\s*[:\-]?\s*(\d{1,2}\s+\w+,?\s+\d{4})",
    ]);

    // Groups: card type, number, expiry, holder
    static ref CARD_BLOCK: FieldRules = FieldRules::new(&[
        r"Type\s+de\s+carte\s*[:\-]?\s*(\w+)\s*Numéro\s+de\s+carte\s*[:\-]?\s*([\d\*]+)\s*Expiration\s*[:\-]?\s*([^\n]+)\s*Nom\s+du\s+détenteur\s*[:\-]?\s*([^\n]+)",
    ]);

    static ref GUEST: FieldRules = FieldRules::new(&[
        r"Information\s+du\s+client\s*([A-ZÀ-Ü][a-zà-ü]+\s+[A-ZÀ-Ü][a-zà-ü]+)",
        r"^([A-ZÀ-Ü][a-zà-ü]+\s+[A-ZÀ-Ü][a-zà-ü]+)\s*Courriel",
    ]);

    static ref REFERENCE: FieldRules = FieldRules::new(&[
        r"Numéro\s+de\s+confirmation\s*[:\-]?\s*(\d+)",
        r"Ref[:\-]?\s*(\d+)",
    ]);

    static ref EXPEDIA_VIRTUAL_CARD: Regex = Regex::new(
        r"(?i)expedia\s*virtual\s*card"
    ).unwrap();
}

/// Parser for Expedia e-mails.
pub struct ExpediaParser;

impl EmailParser for ExpediaParser {
    fn platform(&self) -> Platform {
        Platform::Expedia
    }

    fn parse(&self, text: &str) -> Reservation {
        let mut record = Reservation::new(Platform::Expedia);

        record.tarif = TARIF.first_price(text);
        record.vad = record.tarif;

        let nights = NIGHTS.first_text(text);
        record.nights = nights.as_deref().and_then(|n| n.parse().ok());
        record.room_type = ROOM.first_text(text);
        record.stay_details = match (&nights, &record.room_type) {
            (Some(nights), Some(room)) => Some(format!("{} nuit(s) en {}", nights, room)),
            (Some(nights), None) => Some(format!("{} nuit(s)", nights)),
            (None, Some(room)) => Some(room.clone()),
            (None, None) => None,
        };

        record.arrival = ARRIVAL.first_text(text);
        record.departure = DEPARTURE.first_text(text);

        if let Some(caps) = CARD_BLOCK.first_captures(text) {
            let holder = caps[4].trim().to_string();
            record.card = Some(format!("{} {} - {}", &caps[1], &caps[2], holder));
            record.cardholder = Some(holder);
        } else {
            record.cardholder = CARDHOLDER.first_text(text);
        }

        // The holder line decides; without one, any mention of the card does.
        record.is_virtual_card = match &record.cardholder {
            Some(holder) => EXPEDIA_VIRTUAL_CARD.is_match(holder),
            None => EXPEDIA_VIRTUAL_CARD.is_match(text),
        };

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

    const EMAIL: &str = "Expedia Partner Central
Numéro de confirmation : 7788990011
Information du client
Jean Dupont
Courriel : jean.dupont@example.com
Date d'arrivée : 20/06/2025
Date de départ : 22/06/2025
Nombre de nuits : 2 nuits
Type de chambre : Chambre Twin Standard
Type de carte : Visa
Numéro de carte : 4111********1111
Expiration : 08/2026
Nom du détenteur : Expedia VirtualCard
Prix total 245,60 EUR";

    #[test]
    fn test_prices() {
        let record = ExpediaParser.parse(EMAIL);
        let total = Decimal::from_str("245.60").ok();

        assert_eq!(record.tarif, total);
        assert_eq!(record.vad, total);
        assert_eq!(record.commission, None);
    }

    #[test]
    fn test_stay_and_guest() {
        let record = ExpediaParser.parse(EMAIL);

        assert_eq!(record.reservation_id.as_deref(), Some("7788990011"));
        assert_eq!(record.guest_name.as_deref(), Some("Jean Dupont"));
        assert_eq!(record.arrival.as_deref(), Some("20/06/2025"));
        assert_eq!(record.departure.as_deref(), Some("22/06/2025"));
        assert_eq!(record.nights, Some(2));
        assert_eq!(
            record.stay_details.as_deref(),
            Some("2 nuit(s) en Chambre Twin Standard")
        );
    }

    #[test]
    fn test_virtual_card_block() {
        let record = ExpediaParser.parse(EMAIL);

        assert_eq!(
            record.card.as_deref(),
            Some("Visa 4111********1111 - Expedia VirtualCard")
        );
        assert_eq!(record.cardholder.as_deref(), Some("Expedia VirtualCard"));
        assert!(record.is_virtual_card);
    }

    #[test]
    fn test_guest_card_is_not_virtual() {
        let text = EMAIL.replace("Nom du détenteur : Expedia VirtualCard", "Nom du détenteur : Jean Dupont");
        let record = ExpediaParser.parse(&text);

        assert_eq!(record.cardholder.as_deref(), Some("Jean Dupont"));
        assert!(!record.is_virtual_card);
    }

    #[test]
    fn test_virtual_card_mention_without_holder_line() {
        let record = ExpediaParser.parse("Expedia\nPaiement : Expedia VirtualCard\nPrix total 90,00 EUR");
        assert_eq!(record.cardholder, None);
        assert!(record.is_virtual_card);
    }

    #[test]
    fn test_english_dates() {
        let text = "Expedia\nDate d'arrivée : June 20, 2025\nDate de départ : June 22, 2025";
        let record = ExpediaParser.parse(text);

        assert_eq!(record.arrival.as_deref(), Some("June 20, 2025"));
        assert_eq!(record.departure.as_deref(), Some("June 22, 2025"));
    }

    #[test]
    fn test_trailing_amount_fallback() {
        let record = ExpediaParser.parse("Expedia\nMontant dû\n312,40 EUR\n");
        assert_eq!(record.tarif, Decimal::from_str("312.40").ok());
    }
}
