//! Weekendesk package e-mails.
//!
//! Weekendesk states both the guest price and the amount it pays the hotel,
//! so the commission is their difference. Package e-mails also carry an
//! activity recap that is reproduced in the summary.

use lazy_static::lazy_static;

use crate::extraction::rules::patterns::{nights_in, CARDHOLDER, VIRTUAL_CARD_HINT};
use crate::extraction::rules::{extract_recap, FieldRules};
use crate::models::reservation::{commission_from, Reservation};
use crate::platform::Platform;

use super::EmailParser;

lazy_static! {
    static ref TARIF: FieldRules = FieldRules::new(&[
        r"Prix\s+[eé]tablissement\s+pay[eé]\s+par\s+le\s+client\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"Prix\s+client\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"Tarif\s+client\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"Total\s+client\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
    ]);

    static ref VAD: FieldRules = FieldRules::new(&[
        r"Montant\s+pay[eé]\s+par\s+Weekendesk\s+[àa]\s+l['’][eé]tablissement\s*(?:\(TTC\))?\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"Montant\s+[eé]tablissement\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"VAD\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
        r"Virement\s*[:\-]?\s*([\d\s,\.]+)\s*(?:EUR|€)",
    ]);

    static ref STAY: FieldRules = FieldRules::new(&[
        r"S[eé]jour\s*[:\-]?\s*(.+?)(?:\n|$)",
        r"(\d+\s*nuits?\s+en\s+.+?)(?:\n|$)",
        r"(\d+\s*nuits?\s+.+?chambre.+?)(?:\n|$)",
    ]);

    static ref ROOM: FieldRules = FieldRules::new(&[
        r"Type\s+de\s+chambre\s*[:\-]?\s*([^\n]+)",
        r"H[eé]bergement\s*[:\-]?\s*([^\n]+)",
    ]);

    static ref ARRIVAL: FieldRules = FieldRules::new(&[
        r"(?:Date\s+d['’])?[Aa]rriv[eé]e\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
        r"[Cc]heck[\-\s]?in\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
        r"Du\s+(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
    ]);

    static ref DEPARTURE: FieldRules = FieldRules::new(&[
        r"(?:Date\s+de\s+)?[Dd][eé]part\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
        r"[Cc]heck[\-\s]?out\s*[:\-]?\s*(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
        r"[Aa]u\s+(\d{1,2}[/\-\.]\d{1,2}[/\-\.]\d{2,4})",
    ]);

    static ref CARD: FieldRules = FieldRules::new(&[
        r"((?:Carte\s+(?:bancaire\s+)?virtuelle|VCC|Virtual\s+Card)[:\s]*[\s\S]*?(?:CVV|CVC|Code)[:\s]*\d{3,4})",
        r"(N(?:um[eé]ro|°)\s*(?:de\s+)?carte\s*[:\-]?\s*[\d\s\*]+[\s\S]*?(?:CVV|CVC|Code)[:\s]*\d{3,4})",
        r"(Carte\s*[:\-]?\s*\d{4}[\s\*\-]+\d{4}[\s\*\-]+\d{4}[\s\*\-]+\d{4}[\s\S]*?(?:Expiration|Exp|Valid)[:\s]*[\d/]+)",
    ]);

    static ref GUEST: FieldRules = FieldRules::new(&[
        r"(?:Client|Voyageur|Guest|Nom)\s*[:\-]?\s*([A-ZÀ-Ü][a-zà-ü]+\s+[A-ZÀ-Ü][a-zà-ü]+)",
        r"M(?:me|r|lle)?\.?\s+([A-ZÀ-Ü][a-zà-ü]+\s+[A-ZÀ-Ü][a-zà-ü]+)",
    ]);

    static ref REFERENCE: FieldRules = FieldRules::new(&[
        r"(?:N°\s*(?:de\s+)?r[eé]servation|R[eé]f[eé]rence|Booking\s*ID|Confirmation)\s*[:\-]?\s*([A-Z0-9\-]+)",
        r"Dossier\s*[:\-]?\s*([A-Z0-9\-]+)",
    ]);

    static ref RAW_TARIF_LINE: FieldRules = FieldRules::new(&[
        r"(Prix\s+[eé]tablissement\s+pay[eé]\s+par\s+le\s+client\s*[:\-]?\s*[\d\s,\.]+\s*(?:EUR|€))",
    ]);

    static ref RAW_VAD_LINE: FieldRules = FieldRules::new(&[
        r"(Montant\s+pay[eé]\s+par\s+Weekendesk\s+[àa]\s+l['’][eé]tablissement\s*(?:\(TTC\))?\s*[:\-]?\s*[\d\s,\.]+\s*(?:EUR|€))",
    ]);
}

/// Parser for Weekendesk e-mails.
pub struct WeekendeskParser;

impl EmailParser for WeekendeskParser {
    fn platform(&self) -> Platform {
        Platform::Weekendesk
    }

    fn parse(&self, text: &str) -> Reservation {
        let mut record = Reservation::new(Platform::Weekendesk);

        record.tarif = TARIF.first_price(text);
        record.vad = VAD.first_price(text);
        record.commission = commission_from(record.tarif, record.vad);

        record.stay_details = STAY.first_text(text);
        record.nights = record.stay_details.as_deref().and_then(nights_in);
        record.room_type = ROOM.first_text(text);
        record.arrival = ARRIVAL.first_text(text);
        record.departure = DEPARTURE.first_text(text);

        record.card = CARD.first_text(text);
        record.is_virtual_card = record
            .card
            .as_deref()
            .is_some_and(|card| VIRTUAL_CARD_HINT.is_match(card));
        record.cardholder = CARDHOLDER.first_text(text);

        record.guest_name = GUEST.first_text(text);
        record.reservation_id = REFERENCE.first_text(text);

        record.raw_tarif_line = RAW_TARIF_LINE.first_text(text);
        record.raw_vad_line = RAW_VAD_LINE.first_text(text);
        record.activity_recap = extract_recap(text);

        record
    }
}
