//! The Originals franchise bookings.
//!
//! These go through the chain's own rate codes, so no intermediary takes a
//! cut: the whole price is remitted and the commission is zero.

use lazy_static::lazy_static;
use rust_decimal::Decimal;

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

    static ref DAY_RATE: FieldRules = FieldRules::new(&[
        r"Tarif\s+du\s+jour\s*[:\-]?\s*([^\n]+)",
    ]);

    static ref ARRIVAL: FieldRules = FieldRules::new(&[
        r"Date\s+d['’]arriv[eé]e\s*[:\-]?\s*(\d{1,2}\s+\w+,?\s+\d{4})",
        r"Date\s+d['’]arriv[eé]e\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
    ]);

    static ref DEPARTURE: FieldRules = FieldRules::new(&[
        r"Date\s+de\s+d[eé]part\s*[:\-]?\s*(\d{1,2}\s+\w+,?\s+\d{4})",
        r"Date\s+de\s+d[eé]part\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
    ]);

    // Groups: card type, number
    static ref CARD_BLOCK: FieldRules = FieldRules::new(&[
        r"Type\s+de\s+carte\s*[:\-]?\s*(\w+)\s*Numéro\s+de\s+carte\s*[:\-]?\s*([\d\*]+)",
    ]);

    static ref GUEST: FieldRules = FieldRules::new(&[
        r"Information\s+du\s+client\s*([A-ZÀ-Ü][a-zà-ü]+\s+[A-ZÀ-Ü]+)",
        r"^([A-ZÀ-Ü][a-zà-ü]+\s+[A-ZÀ-Ü]+)\s*Courriel",
    ]);

    static ref REFERENCE: FieldRules = FieldRules::new(&[
        r"Numéro\s+de\s+confirmation\s*[:\-]?\s*(\d+)",
        r"Ref[:\-]?\s*(\d+)",
    ]);
}

/// Parser for The Originals e-mails.
pub struct OriginalsParser;

impl EmailParser for OriginalsParser {
    fn platform(&self) -> Platform {
        Platform::Originals
    }

    fn parse(&self, text: &str) -> Reservation {
        let mut record = Reservation::new(Platform::Originals);

        record.tarif = TARIF.first_price(text);
        record.vad = record.tarif;
        record.commission = Some(Decimal::ZERO);

        let nights = NIGHTS.first_text(text);
        record.nights = nights.as_deref().and_then(|n| n.parse().ok());
        record.room_type = ROOM.first_text(text);

        let mut details = Vec::new();
        if let Some(nights) = &nights {
            details.push(format!("{} nuit(s)", nights));
        }
        if let Some(room) = &record.room_type {
            details.push(format!("en {}", room));
        }
        if let Some(rate) = DAY_RATE.first_text(text) {
            details.push(format!("- {}", rate));
        }
        if !details.is_empty() {
            record.stay_details = Some(details.join(" "));
        }

        record.arrival = ARRIVAL.first_text(text);
        record.departure = DEPARTURE.first_text(text);

        record.card = CARD_BLOCK
            .first_captures(text)
            .map(|caps| format!("{} {}", &caps[1], &caps[2]));
        record.cardholder = CARDHOLDER.first_text(text);

        record.guest_name = GUEST.first_text(text);
        record.reservation_id = REFERENCE.first_text(text);

        record
    }
}
