//! Booking.com e-mails.
//!
//! Booking.com does not state the payout. The commission is read either as a
//! percentage of the total or as an absolute fee, and the VAD is derived from it.

use lazy_static::lazy_static;
use rust_decimal::Decimal;

use crate::extraction::rules::patterns::{CARDHOLDER, VIRTUAL_CARD_HINT};
use crate::extraction::rules::FieldRules;
use crate::models::reservation::Reservation;
use crate::platform::Platform;

use super::EmailParser;

lazy_static! {
    static ref TARIF: FieldRules = FieldRules::new(&[
        r"(?:Total|Prix\s+total|Montant\s+total)\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"(?:Price|Amount)\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"(\d+[\d\s,\.]*)\s*(?:EUR|€)\s*(?:au\s+total|total)",
    ]);

    static ref COMMISSION: FieldRules = FieldRules::new(&[
        r"(?:Commission|Frais)\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€|%)",
        r"(\d+[\d\s,\.]*)\s*%\s*(?:de\s+)?commission",
    ]);

    static ref NIGHTS: FieldRules = FieldRules::new(&[
        r"(\d+)\s*(?:nuit|night)s?",
    ]);

    static ref ROOM: FieldRules = FieldRules::new(&[
        r"(?:Chambre|Room|Type)\s*[:\-]?\s*([^\n]+)",
    ]);

    static ref ARRIVAL: FieldRules = FieldRules::new(&[
        r"(?:Arriv[eé]e|Check[\-\s]?in|From)\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
        r"(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})\s*[\-–]\s*\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4}",
        r"(\d{1,2}\s+(?:jan|f[eé]v|mar|avr|mai|juin|juil|ao[uû]|sep|oct|nov|d[eé]c)[a-z]*\s+\d{2,4})",
    ]);

    static ref DEPARTURE: FieldRules = FieldRules::new(&[
        r"(?:D[eé]part|Check[\-\s]?out|To)\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
        r"\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4}\s*[\-–]\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
    ]);

    static ref CARD: FieldRules = FieldRules::new(&[
        r"((?:Carte|Card)[:\s]*[\d\*\s]+[\s\S]*?(?:CVV|CVC|Exp)[:\s]*[\d/]+)",
        r"((?:Virtual\s+)?(?:Credit\s+)?Card[:\s]*[\s\S]*?(?:Security|CVV)[:\s]*\d{3,4})",
    ]);

    static ref GUEST: FieldRules = FieldRules::new(&[
        r"(?:Guest|Client|Voyageur|Booker)\s*(?:name)?\s*[:\-]?\s*([A-ZÀ-Ü][a-zà-ü]+(?:\s+[A-ZÀ-Ü][a-zà-ü]+)+)",
        r"(?:Réservation\s+(?:de|pour|by))\s+([A-ZÀ-Ü][a-zà-ü]+(?:\s+[A-ZÀ-Ü][a-zà-ü]+)+)",
    ]);

    static ref REFERENCE: FieldRules = FieldRules::new(&[
        r"(?:Confirmation|Booking|Reservation)\s*(?:number|ID|N°)?\s*[:\-]?\s*(\d+)",
        r"#\s*(\d+)",
    ]);
}

/// Parser for Booking.com e-mails.
pub struct BookingParser;

impl EmailParser for BookingParser {
    fn platform(&self) -> Platform {
        Platform::Booking
    }

    fn parse(&self, text: &str) -> Reservation {
        let mut record = Reservation::new(Platform::Booking);

        record.tarif = TARIF.first_price(text);

        if let Some(found) = COMMISSION.first_price_match(text) {
            record.commission = if found.source.contains('%') {
                // Overflow leaves the commission unknown.
                record
                    .tarif
                    .and_then(|tarif| tarif.checked_mul(found.value))
                    .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
                    .map(|v| v.round_dp(2))
            } else {
                Some(found.value)
            };
        }
        if let (Some(tarif), Some(commission)) = (record.tarif, record.commission) {
            record.vad = tarif.checked_sub(commission).map(|v| v.round_dp(2));
        }

        let nights = NIGHTS.first_text(text);
        record.nights = nights.as_deref().and_then(|n| n.parse().ok());
        record.room_type = ROOM.first_text(text);
        record.stay_details = match (&nights, &record.room_type) {
            (Some(nights), Some(room)) => Some(format!("{} nuit(s) - {}", nights, room)),
            (Some(nights), None) => Some(format!("{} nuit(s)", nights)),
            (None, Some(room)) => Some(room.clone()),
            (None, None) => None,
        };

        record.arrival = ARRIVAL.first_text(text);
        record.departure = DEPARTURE.first_text(text);

        record.card = CARD.first_text(text);
        record.is_virtual_card = VIRTUAL_CARD_HINT.is_match(text);
        record.cardholder = CARDHOLDER.first_text(text);

        record.guest_name = GUEST.first_text(text);
        record.reservation_id = REFERENCE.first_text(text);

        record
    }
}
