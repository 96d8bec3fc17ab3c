//! HRS corporate bookings.
//!
//! HRS guarantees every stay with a virtual card charged by the property.
//! Its e-mails are bilingual and give the stay as a `dd.mm.yyyy - dd.mm.yyyy`
//! range, from which the number of nights is computed.

use lazy_static::lazy_static;

use crate::extraction::rules::patterns::{nights_in, CARDHOLDER};
use crate::extraction::rules::{nights_between, FieldRules};
use crate::models::reservation::{commission_from, Reservation};
use crate::platform::Platform;

use super::EmailParser;

lazy_static! {
    static ref TARIF: FieldRules = FieldRules::new(&[
        r"(?:Total\s+amount|Montant\s+total|Gesamtbetrag|Total\s+price|Prix\s+total)\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"Total\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
    ]);

    // Amount charged on the virtual card
    static ref CARD_AMOUNT: FieldRules = FieldRules::new(&[
        r"(?:Guaranteed\s+amount|Montant\s+garanti|Garantierter\s+Betrag)\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"(?:Amount\s+(?:charged\s+)?(?:to|on)\s+(?:the\s+)?virtual\s+card|Montant\s+(?:[àa]\s+d[eé]biter\s+sur\s+la|de\s+la)\s+carte\s+virtuelle)\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
    ]);

    static ref ARRIVAL: FieldRules = FieldRules::new(&[
        r"(\d{1,2}\.\d{1,2}\.\d{4})\s*[\-–]\s*\d{1,2}\.\d{1,2}\.\d{4}",
        r"(?:Arrival|Anreise|Arriv[eé]e)\s*[:\-]?\s*(\d{1,2}\.\d{1,2}\.\d{4})",
    ]);

    static ref DEPARTURE: FieldRules = FieldRules::new(&[
        r"\d{1,2}\.\d{1,2}\.\d{4}\s*[\-–]\s*(\d{1,2}\.\d{1,2}\.\d{4})",
        r"(?:Departure|Abreise|D[eé]part)\s*[:\-]?\s*(\d{1,2}\.\d{1,2}\.\d{4})",
    ]);

    static ref ROOM: FieldRules = FieldRules::new(&[
        r"(?:Room\s+type|Room\s+category|Type\s+de\s+chambre|Zimmerkategorie)\s*[:\-]?\s*([^\n]+)",
    ]);

    static ref CARD_NUMBER: FieldRules = FieldRules::new(&[
        r"(?:Card\s+number|Num[eé]ro\s+de\s+carte|Kartennummer)\s*[:\-]?\s*([^\n]+)",
    ]);

    static ref CARD_EXPIRY: FieldRules = FieldRules::new(&[
        r"(?:Expiry\s+date|Valid\s+until|Expiration|G[üu]ltig\s+bis)\s*[:\-]?\s*(\d{1,2}/\d{2,4})",
    ]);

    static ref GUEST: FieldRules = FieldRules::new(&[
        r"(?:Guest\s+name|Nom\s+du\s+client|Gast|Guest|Client)\s*[:\-]?\s*([A-ZÀ-Ü][a-zà-ü]+(?:[ \t]+[A-ZÀ-Ü][a-zà-ü\-]+)+)",
    ]);

    static ref REFERENCE: FieldRules = FieldRules::new(&[
        r"(?:Reservation\s+number|Booking\s+number|Buchungsnummer|Num[eé]ro\s+de\s+r[eé]servation)\s*[:\-]?\s*(\d+)",
        r"(?:Process\s+number|Vorgangsnummer)\s*[:\-]?\s*(\d+)",
    ]);
}

/// Parser for HRS e-mails.
pub struct HrsParser;

impl EmailParser for HrsParser {
    fn platform(&self) -> Platform {
        Platform::Hrs
    }

    fn parse(&self, text: &str) -> Reservation {
        let mut record = Reservation::new(Platform::Hrs);

        record.tarif = TARIF.first_price(text);
        match CARD_AMOUNT.first_price(text) {
            Some(amount) => {
                record.vad = Some(amount);
                record.commission = commission_from(record.tarif, record.vad);
            }
            None => record.vad = record.tarif,
        }

        record.arrival = ARRIVAL.first_text(text);
        record.departure = DEPARTURE.first_text(text);
        record.nights = match (&record.arrival, &record.departure) {
            (Some(arrival), Some(departure)) => nights_between(arrival, departure),
            _ => None,
        }
        .or_else(|| nights_in(text));

        record.room_type = ROOM.first_text(text);
        record.stay_details = match (record.nights, &record.room_type) {
            (Some(nights), Some(room)) => Some(format!("{} nuit(s) - {}", nights, room)),
            (Some(nights), None) => Some(format!("{} nuit(s)", nights)),
            (None, Some(room)) => Some(room.clone()),
            (None, None) => None,
        };

        record.is_virtual_card = true;
        record.card = CARD_NUMBER.first_text(text).map(|number| {
            match CARD_EXPIRY.first_text(text) {
                Some(expiry) => format!("{} - exp {}", number, expiry),
                None => number,
            }
        });
        record.cardholder = CARDHOLDER.first_text(text);

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

    const EMAIL: &str = "HRS - Hotel Reservation Service
Reservation number / Numéro de réservation: 418822731
Guest name: Anna Schmidt
Stay / Séjour: 12.05.2025 - 14.05.2025
Room type: Double room Comfort
Total amount: 356,00 EUR
Guaranteed amount: 320,40 EUR
Card number: 5412 75XX XXXX 1234
Expiry date: 06/2026
Card holder: HRS GmbH
";

    #[test]
    fn test_card_amount_sets_vad_and_commission() {
        let record = HrsParser.parse(EMAIL);

        assert_eq!(record.tarif, dec("356.00"));
        assert_eq!(record.vad, dec("320.40"));
        assert_eq!(record.commission, dec("35.60"));
    }

    #[test]
    fn test_without_card_amount() {
        let text = EMAIL.replace("Guaranteed amount: 320,40 EUR\n", "");
        let record = HrsParser.parse(&text);

        assert_eq!(record.tarif, dec("356.00"));
        assert_eq!(record.vad, dec("356.00"));
        assert_eq!(record.commission, None);
    }

    #[test]
    fn test_dotted_range_and_nights() {
        let record = HrsParser.parse(EMAIL);

        assert_eq!(record.arrival.as_deref(), Some("12.05.2025"));
        assert_eq!(record.departure.as_deref(), Some("14.05.2025"));
        assert_eq!(record.nights, Some(2));
        assert_eq!(
            record.stay_details.as_deref(),
            Some("2 nuit(s) - Double room Comfort")
        );
    }

    #[test]
    fn test_nights_across_month_end() {
        let record = HrsParser.parse("HRS\nAnreise: 30.04.2025\nAbreise: 03.05.2025\n");
        assert_eq!(record.arrival.as_deref(), Some("30.04.2025"));
        assert_eq!(record.departure.as_deref(), Some("03.05.2025"));
        assert_eq!(record.nights, Some(3));
    }

    #[test]
    fn test_always_virtual_card() {
        let record = HrsParser.parse(EMAIL);

        assert!(record.is_virtual_card);
        assert_eq!(record.card.as_deref(), Some("5412 75XX XXXX 1234 - exp 06/2026"));
        assert_eq!(record.cardholder.as_deref(), Some("HRS GmbH"));
        assert!(HrsParser.parse("").is_virtual_card);
    }

    #[test]
    fn test_guest_and_reference() {
        let record = HrsParser.parse(EMAIL);

        assert_eq!(record.guest_name.as_deref(), Some("Anna Schmidt"));
        assert_eq!(record.reservation_id.as_deref(), Some("418822731"));
    }
}
