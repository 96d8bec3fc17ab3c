//! Direct bookings and e-mails no platform claims.
//!
//! Without an intermediary the guest pays the property, so the full price is
//! remitted and the commission is zero.

use lazy_static::lazy_static;
use rust_decimal::Decimal;

use crate::extraction::rules::patterns::nights_in;
use crate::extraction::rules::FieldRules;
use crate::models::reservation::Reservation;
use crate::platform::Platform;

use super::EmailParser;

lazy_static! {
    static ref TARIF: FieldRules = FieldRules::new(&[
        r"(?:Montant\s+total|Prix\s+total|Total(?:\s+TTC)?|Tarif|Montant)\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"(\d+[\d\s,\.]*)\s*(?:EUR|€)",
    ]);

    static ref STAY: FieldRules = FieldRules::new(&[
        r"S[eé]jour\s*[:\-]?\s*([^\n]+)",
    ]);

    static ref ROOM: FieldRules = FieldRules::new(&[
        r"(?:Type\s+de\s+chambre|Chambre|Room)\s*[:\-]?\s*([^\n]+)",
    ]);

    static ref ARRIVAL: FieldRules = FieldRules::new(&[
        r"(?:Arriv[eé]e|Check[\-\s]?in)\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
        r"\bDu\s+(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
    ]);

    static ref DEPARTURE: FieldRules = FieldRules::new(&[
        r"(?:D[eé]part|Check[\-\s]?out)\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
        r"\bAu\s+(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
    ]);

    static ref GUEST: FieldRules = FieldRules::new(&[
        r"(?:Client|Nom|Guest|Voyageur)\s*[:\-]?\s*([A-ZÀ-Ü][a-zà-ü]+(?:[ \t]+[A-ZÀ-Ü][a-zà-ü\-]+)+)",
        r"\bM(?:me|r|lle)\.?[ \t]+([A-ZÀ-Ü][a-zà-ü]+(?:[ \t]+[A-ZÀ-Ü][a-zà-ü\-]+)+)",
    ]);

    static ref REFERENCE: FieldRules = FieldRules::new(&[
        r"(?:N°\s*(?:de\s+)?r[eé]servation|R[eé]f[eé]rence|Confirmation)\s*[:\-]?\s*([A-Z0-9\-]*\d[A-Z0-9\-]*)",
    ]);
}

/// Fallback parser: generic French wording, no platform-specific rule.
pub struct DirectParser;

impl EmailParser for DirectParser {
    fn platform(&self) -> Platform {
        Platform::Direct
    }

    fn parse(&self, text: &str) -> Reservation {
        let mut record = Reservation::new(Platform::Direct);

        record.tarif = TARIF.first_price(text);
        record.vad = record.tarif;
        record.commission = Some(Decimal::ZERO);

        record.stay_details = STAY.first_text(text);
        record.nights = nights_in(text);
        record.room_type = ROOM.first_text(text);
        record.arrival = ARRIVAL.first_text(text);
        record.departure = DEPARTURE.first_text(text);

        record.guest_name = GUEST.first_text(text);
        record.reservation_id = REFERENCE.first_text(text);

        record
    }
}
